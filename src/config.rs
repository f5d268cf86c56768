//! Configuration for BAI2 parsing and validation behavior.
//!
//! Defaults live in code (`Bai2Config::default`); callers who want overrides
//! can load a JSON document with `Bai2Config::from_str`/`from_path` rather than
//! requiring a config file to exist for the crate to function standalone.

use crate::errors::{Bai2Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable policy knobs the specification leaves as documented choices rather
/// than fixed behavior (see the Open Questions in the design notes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bai2Config {
    /// When `true`, trailing continuation tokens that don't match a record's
    /// known grammar are rejected as a record error instead of being silently
    /// discarded. Default `false` matches the reference source's behavior.
    pub strict_continuations: bool,
    /// Overrides the built-in permissive currency allow-list. `None` means
    /// use `codes::is_known_currency`.
    pub allowed_currencies: Option<Vec<String>>,
    /// Default `maxLen` applied by `File::emit` when the caller doesn't
    /// supply one explicitly. `None` means unlimited (single physical line
    /// per record).
    pub default_max_line_len: Option<usize>,
}

impl Default for Bai2Config {
    fn default() -> Self {
        Bai2Config {
            strict_continuations: false,
            allowed_currencies: None,
            default_max_line_len: None,
        }
    }
}

impl Bai2Config {
    /// Loads a config document, falling back to `Bai2Config::default()` for
    /// every field the document omits (via `#[serde(default)]`).
    pub fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| Bai2Error::structural(0, format!("invalid config document: {e}")))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            Bai2Error::structural(
                0,
                format!("could not read config file {:?}: {e}", path.as_ref()),
            )
        })?;
        Self::from_str(&contents)
    }

    pub fn is_currency_allowed(&self, code: &str) -> bool {
        match &self.allowed_currencies {
            Some(list) => list.iter().any(|c| c.eq_ignore_ascii_case(code)),
            None => crate::codes::is_known_currency(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Bai2Config::default();
        assert!(!cfg.strict_continuations);
        assert!(cfg.allowed_currencies.is_none());
        assert!(cfg.is_currency_allowed("CAD"));
        assert!(!cfg.is_currency_allowed("ZZZ"));
    }

    #[test]
    fn test_from_str_partial_override() {
        let cfg = Bai2Config::from_str(r#"{"strict_continuations": true}"#).unwrap();
        assert!(cfg.strict_continuations);
        assert!(cfg.allowed_currencies.is_none());
    }

    #[test]
    fn test_allowed_currencies_override() {
        let cfg = Bai2Config::from_str(r#"{"allowed_currencies": ["CAD", "USD"]}"#).unwrap();
        assert!(cfg.is_currency_allowed("cad"));
        assert!(!cfg.is_currency_allowed("EUR"));
    }
}
