use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            dir: "reports".to_string(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[data]
path = "consultants_revenue.csv"

[logging]
level = "info"

[export]
dir = "reports"
"#;

/// Load configuration from `dashboard.toml`.
///
/// Search order:
/// 1. Next to the executable
/// 2. The current directory
/// 3. Falls back to embedded default config
///
/// Returns the config and, when one was found, the file it came from. Runs
/// before logging is set up, so the caller reports where it came from.
pub fn load_config() -> anyhow::Result<(Config, Option<PathBuf>)> {
    for candidate in candidate_paths() {
        if candidate.exists() {
            let contents = std::fs::read_to_string(&candidate)
                .with_context(|| format!("reading {}", candidate.display()))?;
            let config = parse_config(&contents)
                .with_context(|| format!("parsing {}", candidate.display()))?;
            return Ok((config, Some(candidate)));
        }
    }
    Ok((parse_config(DEFAULT_CONFIG)?, None))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join(CONFIG_FILE));
        }
    }
    paths.push(PathBuf::from(CONFIG_FILE));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.data.path, "consultants_revenue.csv");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.export.dir, "reports");
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let config = parse_config("[data]\npath = \"inspections.csv\"\n").unwrap();
        assert_eq!(config.data.path, "inspections.csv");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.export.dir, "reports");
    }

    #[test]
    fn data_section_is_required() {
        assert!(parse_config("[logging]\nlevel = \"debug\"\n").is_err());
    }
}
