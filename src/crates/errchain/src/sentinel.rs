//! Sentinel errors
//!
//! A sentinel is an immutable error constant identified by where it lives,
//! not by what it says. Define sentinels as `static` items:
//!
//! ```rust
//! use errchain::Sentinel;
//!
//! static ERR_NOT_FOUND: Sentinel = Sentinel::new("not found");
//! static ERR_ALSO_NOT_FOUND: Sentinel = Sentinel::new("not found");
//!
//! assert_eq!(ERR_NOT_FOUND.to_string(), "not found");
//! assert_ne!(ERR_NOT_FOUND, ERR_ALSO_NOT_FOUND);
//! ```
//!
//! A `const` sentinel is inlined at every use site and has no stable
//! address, so only `static` sentinels compare reliably.

use std::error::Error as StdError;
use std::fmt;
use std::ptr;

/// The operation was canceled.
///
/// This is the only sentinel that belongs to the [`Cause`](crate::Cause)
/// taxonomy.
pub static CANCELED: Sentinel = Sentinel::new("cancelled");

/// Immutable, identity-compared error constant
pub struct Sentinel {
    text: &'static str,
}

impl Sentinel {
    /// Create a sentinel from a fixed text
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// The text this sentinel was defined with
    pub const fn text(&self) -> &'static str {
        self.text
    }
}

impl PartialEq for Sentinel {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for Sentinel {}

impl fmt::Debug for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sentinel")
            .field(&self.text)
            .field(&(self as *const Self))
            .finish()
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

impl StdError for Sentinel {}
