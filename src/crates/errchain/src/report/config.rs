//! Report settings read from the environment

use std::env;
use std::str::FromStr;

use crate::{ChainError, Result};

/// Prefix of the environment variables read by [`ReportConfig::from_env`]
pub const ENV_PREFIX: &str = "ERRCHAIN_";

/// Largest accepted indent width
pub const MAX_INDENT: usize = 16;

/// Settings for [`format_chain`](super::format_chain)
///
/// Loaded from `{PREFIX}INDENT`, `{PREFIX}MAX_DEPTH` and `{PREFIX}SHOW_KIND`.
/// Unset variables keep their default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Spaces of indentation added per level
    pub indent: usize,
    /// Maximum number of `Caused by` lines before the rest is collapsed
    pub max_depth: Option<usize>,
    /// Append the link kind (`sentinel`, `wrapped`, `foreign`) to each line
    pub show_kind: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            max_depth: None,
            show_kind: false,
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_show_kind(mut self, show_kind: bool) -> Self {
        self.show_kind = show_kind;
        self
    }

    /// Load and validate settings from `{prefix}INDENT`, `{prefix}MAX_DEPTH`
    /// and `{prefix}SHOW_KIND`
    ///
    /// ```rust
    /// use errchain::report::{ReportConfig, ENV_PREFIX};
    ///
    /// let config = ReportConfig::from_env(ENV_PREFIX).unwrap();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn from_env(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        if let Some(indent) = read_var(prefix, "INDENT")? {
            config.indent = indent;
        }
        config.max_depth = read_var(prefix, "MAX_DEPTH")?;
        if let Some(flag) = read_var::<Flag>(prefix, "SHOW_KIND")? {
            config.show_kind = flag.0;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.indent > MAX_INDENT {
            return Err(ChainError::Config(format!(
                "indent must be at most {}, got {}",
                MAX_INDENT, self.indent
            )));
        }
        if self.max_depth == Some(0) {
            return Err(ChainError::Config("max_depth must be non-zero".into()));
        }
        Ok(())
    }
}

fn read_var<T>(prefix: &str, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{}{}", prefix, name);
    let raw = match env::var(&key) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ChainError::Env(format!("{} is not valid UTF-8", key)))
        }
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e| ChainError::Env(format!("{}={:?}: {}", key, raw, e)))
}

// Boolean switch accepting the usual spellings.
struct Flag(bool);

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Flag(true)),
            "0" | "false" | "no" | "off" => Ok(Flag(false)),
            _ => Err("expected a boolean".to_string()),
        }
    }
}
