//! Configuration sources

mod loader;

pub use loader::{
    ConfigLoadError, ENV_FORMAT, ENV_LAYOUT, ENV_MISSING_FIELD_SEVERITY, ENV_OUTPUT, ENV_STRICT,
    config_from_env, config_from_vars, load_config_file,
};
