//! Root extraction and ordered chain traversal

use std::iter::FusedIterator;

use tracing::trace;

use super::Error;

/// Iterator over the links of a chain, outermost first
///
/// Yields every wrapped node and finally the root, then stops.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Chain<'a> {
    /// Start a traversal at `err`; an absent error yields nothing
    pub fn new(err: Option<&'a Error>) -> Self {
        Self { next: err }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.inner();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

impl Error {
    /// Iterate over this error and every error it wraps
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(Some(self))
    }

    /// The innermost non-wrapped error and the number of wrap layers above it
    pub fn root(&self) -> (&Error, usize) {
        let mut current = self;
        let mut depth = 0;
        while let Error::Wrapped(wrapped) = current {
            current = wrapped.inner();
            depth += 1;
        }
        (current, depth)
    }

    /// Number of wrap layers between this error and its root
    pub fn depth(&self) -> usize {
        self.root().1
    }
}

/// Get the root of an error chain
///
/// Follows wrapped links until reaching an error that wraps nothing. The
/// returned depth counts the wrap layers traversed: `0` for an absent error
/// or one that is not wrapped.
///
/// # Example
///
/// ```rust
/// use errchain::{root, Error, Sentinel};
///
/// static ERR_SENTINEL: Sentinel = Sentinel::new("sentinel");
///
/// let err = Error::from(&ERR_SENTINEL).wrap("wrap 1").wrap("wrap 2");
/// let (root_err, depth) = root(Some(&err));
/// assert_eq!(root_err, Some(Error::from(&ERR_SENTINEL)));
/// assert_eq!(depth, 2);
///
/// assert_eq!(root(None), (None, 0));
/// ```
pub fn root(err: Option<&Error>) -> (Option<Error>, usize) {
    match err {
        Some(err) => {
            let (root, depth) = err.root();
            trace!(depth, kind = root.kind(), "Resolved chain root");
            (Some(root.clone()), depth)
        }
        None => (None, 0),
    }
}

/// Visit each link of an error chain, outermost first
///
/// `visit` is called once per link including the root. Returning `false`
/// stops the traversal immediately. An absent error is never visited.
///
/// # Example
///
/// ```rust
/// use errchain::{walk, Error, CANCELED};
///
/// let err = Error::from(&CANCELED).wrap("wrap 1").wrap("wrap 2");
///
/// let mut seen = Vec::new();
/// walk(Some(&err), |link| {
///     seen.push(link.to_string());
///     true
/// });
/// assert_eq!(seen, ["wrap 2 : wrap 1 : cancelled", "wrap 1 : cancelled", "cancelled"]);
/// ```
pub fn walk<F>(err: Option<&Error>, mut visit: F)
where
    F: FnMut(&Error) -> bool,
{
    for (depth, link) in Chain::new(err).enumerate() {
        if !visit(link) {
            trace!(depth, "Chain walk stopped by visitor");
            return;
        }
    }
}
