pub mod build_info;

use std::{env, path::PathBuf, sync::Once};

use dirs::home_dir;

use crate::errors::{FeasibilityError, Result};

const DEFAULT_DIR_NAME: &str = ".feasibility_core";
const CONFIG_FILE: &str = "config.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive(
                "feasibility_core=info"
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            );

        if let Err(err) = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            eprintln!("tracing subscriber not installed: {err}");
        }
    });
}

/// Returns the application data directory, defaulting to `~/.feasibility_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FEASIBILITY_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the engine configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Rejects NaN and infinite intermediates instead of letting them reach callers.
pub fn ensure_finite(stage: &str, field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::warn!(stage, field, value, "non-finite value produced");
        Err(FeasibilityError::ArithmeticAnomaly(format!(
            "{stage}: `{field}` evaluated to {value}"
        )))
    }
}
