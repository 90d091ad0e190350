//! Wrapping helpers for `Result`
//!
//! `Ok` values pass through untouched, which is the `Result` form of
//! "wrapping no error yields no error".
//!
//! [`WrapErr`] covers errors that already convert into a chain [`Error`]
//! (chains, sentinels, causes, `anyhow`). [`WrapForeignErr`] covers any other
//! `std::error::Error`, such as `std::io::Error`.

use std::error::Error as StdError;

use crate::chain::Error;

/// Trait for wrapping the error side of a `Result`
///
/// # Example
///
/// ```rust
/// use errchain::{Error, WrapErr, CANCELED};
///
/// fn fetch() -> Result<u32, Error> {
///     Err(Error::from(&CANCELED))
/// }
///
/// fn get_item() -> Result<u32, Error> {
///     fetch().wrap_err("getting item")
/// }
///
/// let err = get_item().unwrap_err();
/// assert_eq!(err.to_string(), "getting item : cancelled");
///
/// let ok: Result<u32, Error> = Ok(7);
/// assert_eq!(ok.wrap_err("unused").unwrap(), 7);
/// ```
pub trait WrapErr<T> {
    /// Wrap the error with a message
    ///
    /// # Arguments
    ///
    /// * `msg` - Message describing what was being attempted
    fn wrap_err(self, msg: impl Into<String>) -> Result<T, Error>;

    /// Wrap the error with a lazily built message
    ///
    /// The closure only runs when the result is an error.
    fn wrap_err_with<F>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> String;
}

impl<T, E> WrapErr<T> for Result<T, E>
where
    E: Into<Error>,
{
    fn wrap_err(self, msg: impl Into<String>) -> Result<T, Error> {
        self.map_err(|e| e.into().wrap(msg))
    }

    fn wrap_err_with<F>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().wrap(f()))
    }
}

/// Trait for wrapping a plain `std::error::Error` result
///
/// # Example
///
/// ```rust
/// use errchain::WrapForeignErr;
///
/// let result: Result<String, std::io::Error> = std::fs::read_to_string("/does/not/exist");
/// let err = result.wrap_foreign_err("reading settings").unwrap_err();
/// assert!(err.to_string().starts_with("reading settings : "));
/// assert_eq!(err.depth(), 1);
/// ```
pub trait WrapForeignErr<T> {
    /// Adopt the error as a foreign leaf and wrap it with a message
    fn wrap_foreign_err(self, msg: impl Into<String>) -> Result<T, Error>;

    /// Like [`wrap_foreign_err`](WrapForeignErr::wrap_foreign_err) with a
    /// lazily built message
    fn wrap_foreign_err_with<F>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> String;
}

impl<T, E> WrapForeignErr<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn wrap_foreign_err(self, msg: impl Into<String>) -> Result<T, Error> {
        self.map_err(|e| Error::foreign(e).wrap(msg))
    }

    fn wrap_foreign_err_with<F>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::foreign(e).wrap(f()))
    }
}
