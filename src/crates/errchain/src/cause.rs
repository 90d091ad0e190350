//! Classified causes
//!
//! A [`Cause`] names the condition responsible for a failure, independent of
//! how many layers of context were added on top of it.

use std::error::Error as StdError;
use std::fmt;

use crate::sentinel::{Sentinel, CANCELED};

/// Taxonomy of classified error causes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Cause {
    /// The operation was canceled
    Canceled,
}

impl Cause {
    /// Classify a sentinel by identity
    ///
    /// Returns `None` for sentinels outside the taxonomy, including sentinels
    /// that merely share a taxonomy member's text.
    pub fn classify(sentinel: &Sentinel) -> Option<Self> {
        if *sentinel == CANCELED {
            Some(Cause::Canceled)
        } else {
            None
        }
    }

    /// The sentinel backing this taxonomy member
    pub fn sentinel(self) -> &'static Sentinel {
        match self {
            Cause::Canceled => &CANCELED,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentinel().text())
    }
}

impl StdError for Cause {}
