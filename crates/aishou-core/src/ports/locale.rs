/// Language/localization subsystem collaborator.
pub trait LocalePort: Send + Sync {
    /// Initialize the language subsystem. Runs once at bootstrap, before
    /// registration so the request carries the right language tag.
    fn initialize(&self) -> anyhow::Result<()>;

    /// Current language tag, e.g. `en`.
    fn language(&self) -> String;
}
