//! User configuration (`config.toml`).

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use tabula_core::analysis::DEFAULT_PROMPT_TEMPLATE;
use tabula_core::sheet::{DEFAULT_COLS, DEFAULT_ROWS};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const MAX_GRID_CELLS: usize = 1_000_000;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sheet: SheetConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Model name handed to whichever generator is plugged in.
    pub model: String,
    /// Prompt text; `{data}` is replaced by the sheet's cells.
    pub prompt_template: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            model: "gemini-2.5-flash".to_string(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        let SheetConfig { rows, cols } = config.sheet;
        if rows == 0 || cols == 0 {
            bail!("sheet.rows and sheet.cols must be at least 1");
        }
        if rows.checked_mul(cols).is_none_or(|n| n > MAX_GRID_CELLS) {
            bail!("sheet is too large ({}x{}, max {} cells)", rows, cols, MAX_GRID_CELLS);
        }
        Ok(config)
    }

    /// Load an explicit config file. It must exist.
    pub fn load_file(path: &Path) -> Result<Config> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            bail!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Config::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Explicit path if given, else the user config if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            return Config::load_file(path);
        }
        match user_config_path() {
            Some(path) if path.is_file() => Config::load_file(&path),
            _ => Ok(Config::default()),
        }
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "tabula")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::default().sheet.rows, 15);
        assert_eq!(Config::default().sheet.cols, 10);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::from_toml("[sheet]\nrows = 40\n").unwrap();
        assert_eq!(config.sheet.rows, 40);
        assert_eq!(config.sheet.cols, 10);
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_analysis_section() {
        let config = Config::from_toml(
            "[analysis]\nmodel = \"local\"\nprompt_template = \"Summarize: {data}\"\n",
        )
        .unwrap();
        assert_eq!(config.analysis.model, "local");
        assert_eq!(config.analysis.prompt_template, "Summarize: {data}");
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(Config::from_toml("[sheet]\nrows = 0\n").is_err());
        assert!(Config::from_toml("[sheet]\nrows = 2000\ncols = 2000\n").is_err());
        assert!(Config::from_toml("[sheet]\ncolumns = 3\n").is_err());
        assert!(Config::from_toml("not toml =").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = std::env::temp_dir().join("tabula_no_such_config.toml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_user_config_path_is_in_tabula_dir() {
        if let Some(path) = user_config_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.toml"));
            assert!(
                path.components()
                    .any(|c| c.as_os_str().to_string_lossy().to_lowercase().contains("tabula"))
            );
        }
    }
}
