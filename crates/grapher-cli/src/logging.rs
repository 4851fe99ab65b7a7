//! Tracing subscriber setup.
//!
//! Logs go to stderr so that command output on stdout stays machine readable.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` is honored unless `-v` was given, in which case the flag wins.
pub fn init(verbosity: u8) {
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(0)))
    } else {
        EnvFilter::new(filter_directive(verbosity))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(0), "warn");
        assert_eq!(filter_directive(1), "info");
        assert_eq!(filter_directive(2), "debug");
        assert_eq!(filter_directive(9), "trace");
    }
}
