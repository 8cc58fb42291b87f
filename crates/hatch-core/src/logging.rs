use tracing_subscriber::EnvFilter;

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,hatch=debug,hatch_dom=info";

/// Install a global fmt subscriber.
///
/// Honors `RUST_LOG` and falls back to [`DEFAULT_FILTER`]. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install a global fmt subscriber with an explicit fallback filter.
pub fn init_with_filter(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init();
        init_with_filter("warn");
        tracing::debug!("logging initialised twice");
    }
}
