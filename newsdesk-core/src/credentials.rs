//! API keys for the language-model and search providers.
//!
//! Keys are read once at startup and never validated here. A missing key
//! becomes an empty string, and the adapter that needs it reports the
//! problem on its first call.

use std::fmt;

pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub google_api_key: String,
    pub serper_api_key: String,
}

impl Credentials {
    pub fn new(google_api_key: impl Into<String>, serper_api_key: impl Into<String>) -> Self {
        Self { google_api_key: google_api_key.into(), serper_api_key: serper_api_key.into() }
    }

    /// Read both keys from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both keys through `lookup`, treating absent values as empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            google_api_key: lookup(GOOGLE_API_KEY_ENV).unwrap_or_default(),
            serper_api_key: lookup(SERPER_API_KEY_ENV).unwrap_or_default(),
        }
    }

    /// Names of the variables that resolved to an empty value.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.google_api_key.is_empty() {
            missing.push(GOOGLE_API_KEY_ENV);
        }
        if self.serper_api_key.is_empty() {
            missing.push(SERPER_API_KEY_ENV);
        }
        missing
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(key: &str) -> &'static str {
            if key.is_empty() { "<unset>" } else { "<redacted>" }
        }
        f.debug_struct("Credentials")
            .field("google_api_key", &redact(&self.google_api_key))
            .field("serper_api_key", &redact(&self.serper_api_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_reads_both_keys() {
        let env = HashMap::from([
            (GOOGLE_API_KEY_ENV, "g-key".to_string()),
            (SERPER_API_KEY_ENV, "s-key".to_string()),
        ]);
        let creds = Credentials::from_lookup(|name| env.get(name).cloned());

        assert_eq!(creds.google_api_key, "g-key");
        assert_eq!(creds.serper_api_key, "s-key");
        assert!(creds.missing().is_empty());
    }

    #[test]
    fn test_absent_keys_are_empty_not_errors() {
        let creds = Credentials::from_lookup(|_| None);

        assert_eq!(creds, Credentials::default());
        assert_eq!(creds.missing(), vec![GOOGLE_API_KEY_ENV, SERPER_API_KEY_ENV]);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials::new("secret-google", "");
        let debug = format!("{:?}", creds);

        assert!(!debug.contains("secret-google"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("<unset>"));
    }
}
