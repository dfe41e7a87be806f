//! Language tag provider.
//!
//! Derives the registration language from the process environment, with
//! an explicit override for hosts that manage language selection
//! themselves.

use tracing::debug;

use aishou_core::ports::LocalePort;

const FALLBACK_LANGUAGE: &str = "en";

pub struct EnvLocale {
    override_lang: Option<String>,
}

impl EnvLocale {
    /// Read the language from the environment (`LANG`).
    pub fn system() -> Self {
        Self {
            override_lang: None,
        }
    }

    /// Fixed language, ignoring the environment.
    pub fn with_language(lang: impl Into<String>) -> Self {
        Self {
            override_lang: Some(lang.into()),
        }
    }
}

impl LocalePort for EnvLocale {
    fn initialize(&self) -> anyhow::Result<()> {
        debug!(language = %self.language(), "locale initialized");
        Ok(())
    }

    fn language(&self) -> String {
        if let Some(lang) = &self.override_lang {
            return lang.clone();
        }
        std::env::var("LANG")
            .ok()
            .as_deref()
            .and_then(parse_language_tag)
            .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
    }
}

/// Extract the primary language from a POSIX locale string, e.g.
/// `en_US.UTF-8` -> `en`.
fn parse_language_tag(raw: &str) -> Option<String> {
    let tag = raw.split(['_', '.', '@']).next()?.trim().to_lowercase();
    if tag.is_empty() || tag == "c" || tag == "posix" {
        return None;
    }
    Some(tag)
}
