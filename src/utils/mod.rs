use dirs::home_dir;
use std::{env, path::PathBuf};

pub const DEFAULT_LOG_FILTER: &str = "expense_core=info";
const DEFAULT_DIR_NAME: &str = ".expense_core";
const CONFIG_FILE: &str = "config.json";

/// Installs the global `fmt` subscriber. `RUST_LOG` directives take precedence
/// over `fallback`.
pub fn init_tracing(fallback: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed by the host application or a test harness.
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Returns the application-specific data directory, defaulting to `~/.expense_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("EXPENSE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Canonical location of the configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_is_nested_in_base() {
        let base = PathBuf::from("/tmp/expense-home");
        assert_eq!(config_file_in(&base), base.join("config.json"));
    }
}
