//! Logging setup. Logs go to stderr; stdout carries only coordinates.

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    /// Number of `-v` flags.
    Level(u8),
}

impl Verbosity {
    pub fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Level(0) => "warn",
            Self::Level(1) => "info",
            Self::Level(2) => "debug",
            Self::Level(_) => "trace",
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `verbosity`.
pub fn init(verbosity: Verbosity) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_levels() {
        assert_eq!(Verbosity::Quiet.filter(), "error");
        assert_eq!(Verbosity::Level(0).filter(), "warn");
        assert_eq!(Verbosity::Level(1).filter(), "info");
        assert_eq!(Verbosity::Level(2).filter(), "debug");
        assert_eq!(Verbosity::Level(7).filter(), "trace");
    }
}
