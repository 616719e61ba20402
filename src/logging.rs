use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: `level` for this crate, warnings elsewhere.
pub fn default_filter(level: &str) -> String {
    format!("warn,smartdiag={}", level)
}

/// Install the stderr fmt subscriber. `RUST_LOG` wins over `level`.
/// A second call is a no-op.
pub fn init(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(level)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "warn,smartdiag=debug");
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(default_filter("info")).is_ok());
        assert!(EnvFilter::try_new(default_filter("trace")).is_ok());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("info");
        init("debug");
    }
}
