//! Configuration system for fluxcli
//!
//! A single YAML file layered under environment overrides and command line
//! flags.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{ALL_NAMESPACES, Config, UiConfig};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "readOnly" => Ok(config.read_only.to_string()),
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "defaultKind" => Ok(config.default_kind.clone()),
        "refreshIntervalSecs" => Ok(config.refresh_interval_secs.to_string()),
        "ui.showNamespace" => Ok(config.ui.show_namespace.to_string()),
        "ui.columnsName" => Ok(config.ui.columns_name.to_string()),
        "ui.columnsStatus" => Ok(config.ui.columns_status.to_string()),
        "ui.noIcons" => Ok(config.ui.no_icons.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "readOnly").unwrap(), "true");
        assert_eq!(
            get_config_value(&config, "defaultKind").unwrap(),
            "Kustomization"
        );
        assert_eq!(get_config_value(&config, "ui.columnsName").unwrap(), "30");
        assert!(get_config_value(&config, "ui.skin").is_err());
    }
}
