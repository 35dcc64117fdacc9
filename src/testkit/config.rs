//! Canonical test configurations.

use std::path::Path;

use crate::config::Config;

/// Default configuration with quiet logging.
pub fn config() -> Config {
    let mut config = Config::default();
    config.logging.level = "warn".into();
    config
}

/// Config file content pointing at `reference_data`.
pub fn config_toml(reference_data: &Path) -> String {
    format!(
        r#"
[logging]
level = "warn"

[pricing]
default_min_margin = 0.10
reference_data = "{}"
destination_country = "US"
"#,
        reference_data.display().to_string().replace('\\', "/")
    )
}
