//! Chain reports and structured logging
//!
//! [`format_chain`] renders an error chain as a multi-line audit trail with
//! one line per link. [`log_chain`] emits the same links as `tracing`
//! events.

use std::borrow::Cow;

use tracing::{debug, error, info, warn};

use crate::chain::Error;

mod config;

pub use config::{ReportConfig, ENV_PREFIX, MAX_INDENT};

/// Log levels for [`log_chain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// The text a single link contributes to the chain
///
/// A wrapped node contributes its own message; a leaf contributes its full
/// description.
pub fn link_message(link: &Error) -> Cow<'_, str> {
    match link.as_wrapped() {
        Some(wrapped) => Cow::Borrowed(wrapped.message()),
        None => Cow::Owned(link.to_string()),
    }
}

/// Format an error chain as a multi-line string
///
/// An `indent` above [`MAX_INDENT`] is clamped to it.
///
/// # Example
///
/// ```rust
/// use errchain::report::{format_chain, ReportConfig};
/// use errchain::{Error, CANCELED};
///
/// let err = Error::from(&CANCELED).wrap("fetching row").wrap("loading user");
/// assert_eq!(
///     format_chain(&err, &ReportConfig::default()),
///     "Error: loading user\n  Caused by: fetching row\n    Caused by: cancelled"
/// );
/// ```
pub fn format_chain(err: &Error, config: &ReportConfig) -> String {
    let mut links = err.chain();
    let mut result = String::from("Error: ");
    if let Some(outer) = links.next() {
        push_link(&mut result, outer, config);
    }

    let indent = config.indent.min(MAX_INDENT);
    let limit = config.max_depth.unwrap_or(usize::MAX);
    for (index, link) in links.by_ref().take(limit).enumerate() {
        let level = index + 1;
        result.push('\n');
        result.push_str(&" ".repeat(level.saturating_mul(indent)));
        result.push_str("Caused by: ");
        push_link(&mut result, link, config);
    }

    let remaining = links.count();
    if remaining > 0 {
        let level = limit.saturating_add(1);
        result.push('\n');
        result.push_str(&" ".repeat(level.saturating_mul(indent)));
        result.push_str(&format!("... ({} more)", remaining));
    }

    result
}

fn push_link(out: &mut String, link: &Error, config: &ReportConfig) {
    out.push_str(&link_message(link));
    if config.show_kind {
        out.push_str(&format!(" [{}]", link.kind()));
    }
}

/// Emit one `tracing` event per link, then one for the root
///
/// Link events carry `depth`, `kind` and the link's own message as `link`.
/// The root event carries the chain depth, the root's description and the
/// classified cause (empty when unclassified).
pub fn log_chain(err: &Error, level: LogLevel) {
    for (depth, link) in err.chain().enumerate() {
        let kind = link.kind();
        let message = link_message(link);
        match level {
            LogLevel::Debug => debug!(depth, kind, link = %message, "Error chain link"),
            LogLevel::Info => info!(depth, kind, link = %message, "Error chain link"),
            LogLevel::Warn => warn!(depth, kind, link = %message, "Error chain link"),
            LogLevel::Error => error!(depth, kind, link = %message, "Error chain link"),
        }
    }

    let (root, depth) = err.root();
    let cause = err.cause().map(|c| c.to_string()).unwrap_or_default();
    match level {
        LogLevel::Debug => debug!(depth, root = %root, cause = %cause, "Error chain root"),
        LogLevel::Info => info!(depth, root = %root, cause = %cause, "Error chain root"),
        LogLevel::Warn => warn!(depth, root = %root, cause = %cause, "Error chain root"),
        LogLevel::Error => error!(depth, root = %root, cause = %cause, "Error chain root"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentinel::{Sentinel, CANCELED};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    static ERR_SENTINEL: Sentinel = Sentinel::new("sentinel error");

    fn three_layers() -> Error {
        Error::from(&ERR_SENTINEL)
            .wrap("opening socket")
            .wrap("connecting")
            .wrap("starting server")
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.contents()
    }

    #[test]
    fn test_format_single_link() {
        let err = Error::from(&ERR_SENTINEL);
        assert_eq!(format_chain(&err, &ReportConfig::default()), "Error: sentinel error");
    }

    #[test]
    fn test_format_chain() {
        let formatted = format_chain(&three_layers(), &ReportConfig::default());
        assert_eq!(
            formatted,
            "Error: starting server\n  Caused by: connecting\n    Caused by: opening socket\n      Caused by: sentinel error"
        );
    }

    #[test]
    fn test_format_chain_indent_and_kind() {
        let config = ReportConfig::new().with_indent(1).with_show_kind(true);
        let err = Error::from(&CANCELED).wrap("getting item");
        assert_eq!(
            format_chain(&err, &config),
            "Error: getting item [wrapped]\n Caused by: cancelled [sentinel]"
        );
    }

    #[test]
    fn test_format_chain_max_depth() {
        let config = ReportConfig::new().with_max_depth(1);
        assert_eq!(
            format_chain(&three_layers(), &config),
            "Error: starting server\n  Caused by: connecting\n    ... (2 more)"
        );
    }

    #[test]
    fn test_format_chain_clamps_indent() {
        let config = ReportConfig::new().with_indent(usize::MAX).with_max_depth(1);
        let formatted = format_chain(&three_layers(), &config);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[1], format!("{}Caused by: connecting", " ".repeat(MAX_INDENT)));
        assert_eq!(lines[2], format!("{}... (2 more)", " ".repeat(2 * MAX_INDENT)));
    }

    #[test]
    fn test_format_foreign_leaf() {
        let err = Error::foreign(io::Error::new(io::ErrorKind::NotFound, "File not found"))
            .wrap("Failed to read configuration");
        let formatted = format_chain(&err, &ReportConfig::default());
        assert!(formatted.contains("Caused by: File not found"));
    }

    #[test]
    fn test_link_message() {
        let err = Error::from(&CANCELED).wrap("getting item");
        assert_eq!(link_message(&err), "getting item");
        assert_eq!(link_message(err.inner().unwrap()), "cancelled");
    }

    #[test]
    fn test_log_chain_emits_every_link() {
        let err = Error::from(&CANCELED).wrap("getting item");
        let output = capture(|| log_chain(&err, LogLevel::Warn));

        assert!(output.contains("Error chain link"));
        assert!(output.contains("getting item"));
        assert!(output.contains("depth=1"));
        assert!(output.contains("Error chain root"));
        assert!(output.contains("cause=cancelled"));
        assert!(output.contains("WARN"));
    }

    #[test]
    fn test_log_chain_unclassified_root() {
        let output = capture(|| log_chain(&three_layers(), LogLevel::Debug));
        assert!(output.contains("opening socket"));
        assert!(output.contains("root=sentinel error"));
        assert!(output.contains("depth=3"));
    }
}
