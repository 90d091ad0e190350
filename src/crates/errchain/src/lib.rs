//! Composable error chains
//!
//! This crate lets a caller attach a descriptive message to an underlying
//! error, recover the root error or its classified cause later, and walk the
//! whole chain from outermost to innermost.
//!
//! # Modules
//!
//! - `sentinel` - Immutable, identity-compared error constants
//! - `cause` - Classified cause taxonomy
//! - `chain` - The `Error` handle, wrapped nodes, root extraction and walking
//! - `context` - `Result` extensions for wrapping errors in place
//! - `report` - Multi-line chain reports, `tracing` output and their settings
//!
//! # Example
//!
//! ```rust
//! use errchain::{root, walk, Cause, Error, Sentinel, CANCELED};
//!
//! static ERR_SENTINEL: Sentinel = Sentinel::new("sentinel error");
//!
//! let err = Error::from(&ERR_SENTINEL).wrap("wrap 1").wrap("wrap 2");
//! assert_eq!(err.to_string(), "wrap 2 : wrap 1 : sentinel error");
//! assert_eq!(root(Some(&err)), (Some(Error::from(&ERR_SENTINEL)), 2));
//!
//! let mut visited = 0;
//! walk(Some(&err), |_| {
//!     visited += 1;
//!     true
//! });
//! assert_eq!(visited, 3);
//!
//! let canceled = Error::from(&CANCELED).wrap("getting item");
//! assert_eq!(canceled.cause(), Some(Cause::Canceled));
//! ```

pub mod cause;
pub mod chain;
pub mod context;
pub mod report;
pub mod sentinel;

pub use cause::Cause;
pub use chain::{root, walk, wrap, Chain, Error, Wrapped, SEPARATOR};
pub use context::{WrapErr, WrapForeignErr};
pub use sentinel::{Sentinel, CANCELED};

use thiserror::Error as ThisError;

/// Errors raised while loading or validating configuration
///
/// Chain operations themselves are total and never fail.
#[derive(Debug, ThisError)]
pub enum ChainError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unreadable or unparsable environment variable
    #[error("Environment variable error: {0}")]
    Env(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_chain_error_display() {
        let err = ChainError::Config("indent too large".into());
        assert_eq!(err.to_string(), "Configuration error: indent too large");
    }

    #[test]
    fn test_chain_error_wraps_into_chain() {
        let err = Error::foreign(ChainError::Env("bad value".into())).wrap("loading report config");
        assert_eq!(
            err.to_string(),
            "loading report config : Environment variable error: bad value"
        );
    }
}
