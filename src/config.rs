//! Render configuration loaded from TOML.
//!
//! ```toml
//! indentation = 2
//! use_parameters = true
//! parameter_start_index = 1
//! quote_identifiers = false
//! ```
//!
//! Lookup order: an explicit path, `./datafilter.toml`, then
//! `<config dir>/datafilter/config.toml`. No file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{FilterError, FilterResult};
use crate::transpiler::{ToSqlOptions, quote_identifiers};

pub const LOCAL_CONFIG_FILE: &str = "datafilter.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub indentation: usize,
    pub use_parameters: bool,
    pub parameter_start_index: usize,
    /// Render fields as `"segment"."segment"`
    pub quote_identifiers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indentation: 0,
            use_parameters: true,
            parameter_start_index: 1,
            quote_identifiers: false,
        }
    }
}

impl RenderConfig {
    pub fn from_toml(content: &str) -> FilterResult<Self> {
        Self::parse(content).map_err(FilterError::Config)
    }

    pub fn from_file(path: &Path) -> FilterResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|message| FilterError::Config(format!("{}: {}", path.display(), message)))
    }

    fn parse(content: &str) -> Result<Self, String> {
        let config: RenderConfig =
            toml::from_str(content).map_err(|e| e.to_string().trim_end().to_string())?;
        config.check()?;
        Ok(config)
    }

    pub fn validate(&self) -> FilterResult<()> {
        self.check().map_err(FilterError::Config)
    }

    fn check(&self) -> Result<(), String> {
        if self.parameter_start_index == 0 {
            return Err("parameter_start_index must be at least 1".to_string());
        }
        Ok(())
    }

    /// Load from `explicit` if given, else the first default location that exists.
    pub fn load(explicit: Option<&Path>) -> FilterResult<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading render config");
            return Self::from_file(path);
        }
        for path in default_locations() {
            if path.exists() {
                debug!(path = %path.display(), "loading render config");
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn to_options(&self) -> ToSqlOptions<String> {
        let mut options = ToSqlOptions::new()
            .indentation(self.indentation)
            .use_parameters(self.use_parameters)
            .parameter_start_index(self.parameter_start_index);
        if self.quote_identifiers {
            options.transformer = Some(quote_identifiers());
        }
        options
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("datafilter").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use crate::transpiler::ToSql;

    #[test]
    fn test_defaults_match_options() {
        let config = RenderConfig::from_toml("").unwrap();
        assert_eq!(config, RenderConfig::default());
        let options = config.to_options();
        assert!(options.use_parameters);
        assert_eq!(options.parameter_start_index, 1);
        assert_eq!(options.indentation, 0);
        assert!(options.transformer.is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = RenderConfig::from_toml("indentation = 4\nuse_parameters = false").unwrap();
        assert_eq!(config.indentation, 4);
        assert!(!config.use_parameters);
        assert_eq!(config.parameter_start_index, 1);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            RenderConfig::from_toml("parameter_start_index = 0"),
            Err(FilterError::Config(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml("indent = 2"),
            Err(FilterError::Config(_))
        ));
    }

    #[test]
    fn test_quote_identifiers_option() {
        let config =
            RenderConfig::from_toml("quote_identifiers = true\nuse_parameters = false").unwrap();
        let sql = eq("u.id", 1).to_sql_inline(&config.to_options()).unwrap();
        assert_eq!(sql.as_deref(), Some(r#""u"."id" = 1"#));
    }

    #[test]
    fn test_file_error_names_path_once() {
        let path = std::env::temp_dir().join(format!("datafilter-{}.toml", std::process::id()));
        std::fs::write(&path, "parameter_start_index = 0").unwrap();
        let err = RenderConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            err.to_string(),
            format!(
                "Configuration error: {}: parameter_start_index must be at least 1",
                path.display()
            )
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = RenderConfig::load(Some(Path::new("/nonexistent/datafilter.toml"))).unwrap_err();
        assert!(matches!(err, FilterError::Io(_)));
    }
}
