//! Wrapped error chains
//!
//! An [`Error`] is a cheap, clonable handle to one of three kinds of error:
//!
//! - a [`Sentinel`] defined as a `static` item
//! - a [`Wrapped`] node carrying a message and exactly one inner error
//! - a foreign error from outside this crate, treated as an opaque leaf
//!
//! Wrapping builds a singly-linked chain that always ends in a sentinel or a
//! foreign error. Nodes are immutable and can only point at errors that
//! already exist, so chains are acyclic.
//!
//! # Example
//!
//! ```rust
//! use errchain::{wrap, Cause, Error, CANCELED};
//!
//! let err = Error::from(&CANCELED).wrap("getting item");
//! assert_eq!(err.to_string(), "getting item : cancelled");
//! assert_eq!(err.cause(), Some(Cause::Canceled));
//!
//! // Wrapping no error yields no error.
//! assert!(wrap(None::<Error>, "getting item").is_none());
//! ```

mod traverse;

pub use traverse::{root, walk, Chain};

use std::error::Error as StdError;
use std::fmt;
use std::mem;
use std::ptr;
use std::sync::Arc;

use crate::cause::Cause;
use crate::sentinel::Sentinel;

/// Separator placed between a wrapping message and the inner description
pub const SEPARATOR: &str = " : ";

// Placeholder left behind in a node whose inner link was detached on drop.
static DETACHED: Sentinel = Sentinel::new("");

/// A link in an error chain
///
/// Equality is identity: two handles are equal only when they refer to the
/// same sentinel, the same wrapped node, or the same foreign allocation.
#[derive(Clone, Debug)]
pub enum Error {
    /// A process-lifetime sentinel constant
    Sentinel(&'static Sentinel),
    /// A message wrapped around an inner error
    Wrapped(Arc<Wrapped>),
    /// Any error from outside this crate
    Foreign(Arc<dyn StdError + Send + Sync + 'static>),
}

/// A message attached to an inner error
#[derive(Debug)]
pub struct Wrapped {
    message: String,
    inner: Error,
}

/// Wrap a possibly absent error with a message
///
/// Returns `None` when `err` is `None`, so the result of a fallible call can
/// be wrapped without checking it first.
pub fn wrap<E>(err: Option<E>, message: impl Into<String>) -> Option<Error>
where
    E: Into<Error>,
{
    err.map(|e| e.into().wrap(message))
}

impl Error {
    /// Adopt an error from outside this crate as a chain leaf
    ///
    /// A chain [`Error`] or [`Wrapped`] node passed here is kept as a chain,
    /// not hidden behind a foreign leaf.
    pub fn foreign<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::from_boxed(Box::new(error))
    }

    /// Adopt an already boxed error
    ///
    /// Boxed chains are recovered with their layers intact.
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        let error = match error.downcast::<Error>() {
            Ok(chain) => return *chain,
            Err(other) => other,
        };
        match error.downcast::<Wrapped>() {
            Ok(node) => Error::Wrapped(Arc::from(node)),
            Err(other) => Error::Foreign(Arc::from(other)),
        }
    }

    /// Wrap this error with a descriptive message
    pub fn wrap(self, message: impl Into<String>) -> Self {
        Error::Wrapped(Arc::new(Wrapped {
            message: message.into(),
            inner: self,
        }))
    }

    /// The next link in the chain, if this is a wrapped node
    pub fn inner(&self) -> Option<&Error> {
        self.as_wrapped().map(Wrapped::inner)
    }

    /// This error as a wrapped node
    pub fn as_wrapped(&self) -> Option<&Wrapped> {
        match self {
            Error::Wrapped(wrapped) => Some(wrapped.as_ref()),
            _ => None,
        }
    }

    /// This error as a sentinel
    pub fn as_sentinel(&self) -> Option<&'static Sentinel> {
        match self {
            Error::Sentinel(sentinel) => Some(*sentinel),
            _ => None,
        }
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, Error::Wrapped(_))
    }

    /// Short name of the variant, used in reports and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Sentinel(_) => "sentinel",
            Error::Wrapped(_) => "wrapped",
            Error::Foreign(_) => "foreign",
        }
    }

    /// The classified cause of this error
    ///
    /// A wrapped node reports its inner error's cause. A sentinel is
    /// classified by identity. A foreign error is classified only if it is a
    /// [`Cause`] itself.
    pub fn cause(&self) -> Option<Cause> {
        match self {
            Error::Sentinel(sentinel) => Cause::classify(sentinel),
            Error::Wrapped(wrapped) => Wrapped::cause(wrapped),
            Error::Foreign(error) => error.downcast_ref::<Cause>().copied(),
        }
    }

    /// Whether any link in the chain is `sentinel`
    pub fn is(&self, sentinel: &Sentinel) -> bool {
        self.chain()
            .filter_map(Error::as_sentinel)
            .any(|link| ptr::eq(link, sentinel))
    }

    /// Borrow a foreign leaf as a concrete type
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        match self {
            Error::Foreign(error) => error.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl Wrapped {
    /// The message attached at wrap time
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped error
    pub fn inner(&self) -> &Error {
        &self.inner
    }

    /// The classified cause one layer down
    pub fn cause(&self) -> Option<Cause> {
        self.inner.cause()
    }
}

// Unlinks nodes this one exclusively owns in a loop, so dropping a deep
// chain does not recurse once per layer.
impl Drop for Wrapped {
    fn drop(&mut self) {
        let mut next = mem::replace(&mut self.inner, Error::Sentinel(&DETACHED));
        loop {
            let node = match next {
                Error::Wrapped(node) => node,
                _ => break,
            };
            match Arc::try_unwrap(node) {
                Ok(mut owned) => {
                    next = mem::replace(&mut owned.inner, Error::Sentinel(&DETACHED));
                }
                Err(_shared) => break,
            }
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Sentinel(a), Error::Sentinel(b)) => ptr::eq(*a, *b),
            (Error::Wrapped(a), Error::Wrapped(b)) => Arc::ptr_eq(a, b),
            (Error::Foreign(a), Error::Foreign(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl Eq for Error {}

impl PartialEq<Sentinel> for Error {
    fn eq(&self, other: &Sentinel) -> bool {
        matches!(self, Error::Sentinel(sentinel) if ptr::eq(*sentinel, other))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Sentinel(sentinel) => fmt::Display::fmt(sentinel, f),
            Error::Wrapped(wrapped) => fmt::Display::fmt(wrapped, f),
            Error::Foreign(error) => fmt::Display::fmt(error, f),
        }
    }
}

// Iterative so that deep chains cannot exhaust the stack while formatting.
impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = self;
        loop {
            f.write_str(&current.message)?;
            f.write_str(SEPARATOR)?;
            match &current.inner {
                Error::Wrapped(next) => current = next.as_ref(),
                leaf => return fmt::Display::fmt(leaf, f),
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Sentinel(_) => None,
            Error::Wrapped(wrapped) => Some(&wrapped.inner),
            Error::Foreign(error) => error.source(),
        }
    }
}

impl StdError for Wrapped {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.inner)
    }
}

impl From<&'static Sentinel> for Error {
    fn from(sentinel: &'static Sentinel) -> Self {
        Error::Sentinel(sentinel)
    }
}

impl From<Cause> for Error {
    fn from(cause: Cause) -> Self {
        Error::Sentinel(cause.sentinel())
    }
}

impl From<&Error> for Error {
    fn from(error: &Error) -> Self {
        error.clone()
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<Error>() {
            Ok(chain) => chain,
            Err(other) => Error::from_boxed(other.into()),
        }
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for Error {
    fn from(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Error::from_boxed(error)
    }
}
