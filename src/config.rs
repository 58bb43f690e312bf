//! Implementation of the configuration module.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

/// The name of the configuration file looked for in the current directory.
pub const CONFIG_FILE_NAME: &str = "udcheck.toml";

/// Represents the configuration for the `udcheck` command line tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct Config {
    /// Configuration for the `check` command.
    pub check: CheckConfig,
    /// Common configuration options for all commands.
    pub common: CommonConfig,
}

/// Represents shared configuration options for `udcheck` commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct CommonConfig {
    /// Display color output.
    pub color: bool,
    /// The directory holding the tag set files.
    pub data_dir: Option<PathBuf>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            color: true,
            data_dir: None,
        }
    }
}

/// Represents the configuration for the `check` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct CheckConfig {
    /// The conformance level to validate against.
    pub level: Option<i64>,
    /// The language code of the treebank.
    pub lang: Option<String>,
    /// Allows more than one word to be attached to the root.
    pub multiple_roots: bool,
    /// Skips comparing the `# text` comment with the word forms.
    pub no_tree_text: bool,
    /// Skips reporting missing `SpaceAfter=No` attributes.
    pub no_space_after: bool,
    /// How many diagnostics of one category are reported.
    pub max_err: Option<usize>,
    /// Diagnostic identifiers to except from being recorded.
    pub except: Vec<String>,
    /// Prints nothing and only reports through the exit status.
    pub silent: bool,
}

impl Config {
    /// Reads a configuration file from the specified path.
    pub fn read_config(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| {
            format!(
                "failed to read configuration file `{path}`",
                path = path.display()
            )
        })?;
        toml::from_str(&text).with_context(|| {
            format!(
                "failed to parse configuration file `{path}`",
                path = path.display()
            )
        })
    }

    /// Loads the configuration for a run.
    ///
    /// An explicit path must exist; otherwise [`CONFIG_FILE_NAME`] is read
    /// from the current directory when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read_config(path);
        }

        let path = Path::new(CONFIG_FILE_NAME);
        if path.is_file() {
            debug!("reading configuration from `{CONFIG_FILE_NAME}`");
            return Self::read_config(path);
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_sections() {
        let mut file = tempfile::NamedTempFile::new().expect("should create a temp file");
        write!(
            file,
            "[check]\nlevel = 3\nexcept = [\"missing-text\"]\n\n[common]\ncolor = false\n"
        )
        .expect("should write the config");

        let config = Config::read_config(file.path()).expect("should read the config");
        assert_eq!(config.check.level, Some(3));
        assert_eq!(config.check.except, ["missing-text"]);
        assert!(!config.common.color);
        assert_eq!(config.common.data_dir, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().expect("should create a temp file");
        write!(file, "[check]\nlevels = 3\n").expect("should write the config");
        assert!(Config::read_config(file.path()).is_err());
    }

    #[test]
    fn defaults_enable_color() {
        let config: Config = toml::from_str("").expect("should parse");
        assert!(config.common.color);
        assert_eq!(config.check, CheckConfig::default());
    }
}
