use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wellbase_engine::UnmatchedStage;
use wellbase_providers::{CsvDecoder, DEFAULT_LABEL_FIELDS};

/// Resolve the workspace data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. WELLBASE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.wellbase (fallback for systems without XDG)
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("WELLBASE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("wellbase"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".wellbase"));
    }

    Err(Error::Config(
        "Could not determine workspace path: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Directories the requests are served from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roots {
    /// Reservoir/field hierarchy (`tree`, `fields`, `wells`, `stages`).
    pub reservoirs: PathBuf,
    /// Loose CSV files looked up by name (`file`).
    pub files: PathBuf,
    /// Per-dataset folders for page data (`page`).
    pub data: PathBuf,
}

impl Default for Roots {
    fn default() -> Self {
        Self {
            reservoirs: PathBuf::from("forTreeView"),
            files: PathBuf::from("csvFiles"),
            data: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Fields kept as text when decoding numerically.
    pub label_fields: Vec<String>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            label_fields: DEFAULT_LABEL_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    pub unmatched_stage: UnmatchedStage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Polygon files served for the `polygons` data name.
    pub polygons: Vec<String>,
    /// Data name whose files are LAS well logs rather than CSV.
    pub log_data_name: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            polygons: ["brur", "Brur3D", "Sifra3D", "Heletz3D", "sifra", "heletz"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            log_data_name: "las_docs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub roots: Roots,
    pub decode: DecodeConfig,
    pub aggregate: AggregateConfig,
    pub page: PageConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Anchor relative roots at `base` (the data directory).
    pub fn rooted_at(mut self, base: &Path) -> Self {
        for root in [
            &mut self.roots.reservoirs,
            &mut self.roots.files,
            &mut self.roots.data,
        ] {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }
        self
    }

    pub fn decoder(&self) -> CsvDecoder {
        CsvDecoder::with_label_fields(self.decode.label_fields.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.roots.reservoirs, PathBuf::from("forTreeView"));
        assert_eq!(config.decode.label_fields, vec!["month", "well", "name"]);
        assert_eq!(config.aggregate.unmatched_stage, UnmatchedStage::Skip);
        assert_eq!(config.page.polygons.len(), 6);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.roots.data = PathBuf::from("/srv/wells/data");
        config.aggregate.unmatched_stage = UnmatchedStage::Fail;

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[decode]\nlabel_fields = [\"month\", \"date\"]\n\n[aggregate]\nunmatched_stage = \"fail\"\n",
        )?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.decode.label_fields, vec!["month", "date"]);
        assert_eq!(config.aggregate.unmatched_stage, UnmatchedStage::Fail);
        assert_eq!(config.roots, Roots::default());
        assert!(config.decoder().is_label("date"));
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nonexistent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[aggregate]\nunmatched_stage = \"explode\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        Ok(())
    }

    #[test]
    fn test_rooted_at_keeps_absolute_roots() {
        let mut config = Config::default();
        config.roots.files = PathBuf::from("/srv/csv");

        let config = config.rooted_at(Path::new("/home/geo/.wellbase"));
        assert_eq!(
            config.roots.reservoirs,
            PathBuf::from("/home/geo/.wellbase/forTreeView")
        );
        assert_eq!(config.roots.files, PathBuf::from("/srv/csv"));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("data/wells"), PathBuf::from("data/wells"));
    }
}
