//! Registration wire types.
//!
//! Request and response payloads exchanged with `POST /v1/auth/register`.
//! The request is ephemeral: built per attempt, never persisted.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Client platform reported during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Macos,
    Windows,
    Linux,
    Unknown,
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "macos" => Ok(Platform::Macos),
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            _ => Ok(Platform::Unknown),
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
            Platform::Macos => write!(f, "macos"),
            Platform::Windows => write!(f, "windows"),
            Platform::Linux => write!(f, "linux"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

impl Platform {
    /// Platform of the running build.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Unknown
        }
    }
}

/// Body of `POST /v1/auth/register`. Built fresh for every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// External billing-identity id the backend keys the account on.
    pub revenue_cat_id: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    /// BCP-47-ish language tag, e.g. `en`.
    pub lang: String,
    pub platform: Platform,
    pub is_anonymous: bool,
}

impl RegistrationRequest {
    /// Anonymous registration: no display name or photo, identified only
    /// by the opaque billing id.
    pub fn anonymous(revenue_cat_id: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            revenue_cat_id: revenue_cat_id.into(),
            display_name: None,
            photo_url: None,
            lang: lang.into(),
            platform: Platform::current(),
            is_anonymous: true,
        }
    }
}

/// Successful registration payload: the backend session credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::{AuthTokens, Platform, RegistrationRequest};

    #[test]
    fn request_serializes_with_camel_case_wire_keys() {
        let request = RegistrationRequest {
            revenue_cat_id: "rc-1".into(),
            display_name: None,
            photo_url: None,
            lang: "en".into(),
            platform: Platform::Ios,
            is_anonymous: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["revenueCatId"], "rc-1");
        assert_eq!(json["lang"], "en");
        assert_eq!(json["platform"], "ios");
        assert_eq!(json["isAnonymous"], true);
        assert!(json["displayName"].is_null());
        assert!(json["photoUrl"].is_null());
    }

    #[test]
    fn tokens_deserialize_from_camel_case_response() {
        let tokens: AuthTokens =
            serde_json::from_str(r#"{"token":"t1","refreshToken":"r1"}"#).unwrap();
        assert_eq!(tokens.token, "t1");
        assert_eq!(tokens.refresh_token, "r1");
    }

    #[test]
    fn platform_parses_and_displays_lowercase_names() {
        assert_eq!("android".parse::<Platform>(), Ok(Platform::Android));
        assert_eq!("vr-headset".parse::<Platform>(), Ok(Platform::Unknown));
        assert_eq!(Platform::Macos.to_string(), "macos");
    }
}
