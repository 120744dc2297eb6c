//! Rule-file loading for the par-tint stream highlighter.
//!
//! This crate owns the on-disk rule syntax so the highlighting core never
//! sees it: a YAML file is parsed into [`RulesConfig`], and the binary
//! translates each [`RuleEntry`] into a registry registration call.
//!
//! Resolution order mirrors the classic rc-file convention:
//! 1. an explicit `-c` override path, if readable
//! 2. `./.par-tint.yaml` in the current directory
//! 3. `~/.par-tint.yaml` in the home directory
//! 4. built-in defaults (no rules file is not an error)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name probed in the current and home directories.
pub const RC_FILE_NAME: &str = ".par-tint.yaml";

/// Errors that can occur when loading the rules file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading the rules file.
    #[error("I/O error reading rules file: {0}")]
    Io(#[from] std::io::Error),

    /// The rules file contained invalid YAML.
    #[error("YAML parse error in rules file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    #[error("rules file validation error: {0}")]
    Validation(String),
}

/// One highlight rule as written in the rules file.
///
/// `pattern` is a regular expression; `style` is a space-separated attribute
/// string such as `"bold red"` or `"underline on blue"`. Both are kept as
/// strings here — compilation and style parsing happen in the core when the
/// rule is registered, so a single bad rule can be skipped with a warning
/// instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub pattern: String,
    pub style: String,
}

/// Parsed rules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Escape character reserved for inline stream commands. Recognized and
    /// carried through to the session, but not interpreted by the matcher.
    #[serde(default = "default_command_char")]
    pub command_char: char,

    /// Highlight rules, in file order (which becomes registration order).
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

fn default_command_char() -> char {
    '%'
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            command_char: default_command_char(),
            rules: Vec::new(),
        }
    }
}

impl RulesConfig {
    /// Load the rules file, walking the resolution order. A missing file at
    /// every location yields the built-in defaults.
    pub fn load(override_path: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::resolve_path(override_path) {
            Some(path) => Self::load_from(&path),
            None => {
                log::info!("No rules file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific rules file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading rules from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse rules from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Pick the rules file to read, if any exists.
    ///
    /// An unreadable override path falls through to the rc-file probes, the
    /// same way the rc convention treats an inaccessible `-c` argument.
    pub fn resolve_path(override_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = override_path {
            if path.is_file() {
                return Some(path.to_path_buf());
            }
            log::warn!("Rules file {:?} is not readable, trying defaults", path);
        }

        let cwd_rc = PathBuf::from(RC_FILE_NAME);
        if cwd_rc.is_file() {
            return Some(cwd_rc);
        }

        if let Some(home) = dirs::home_dir() {
            let home_rc = home.join(RC_FILE_NAME);
            if home_rc.is_file() {
                return Some(home_rc);
            }
        }

        None
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "rule {idx} has an empty pattern"
                )));
            }
            if rule.style.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "rule {idx} ({:?}) has an empty style",
                    rule.pattern
                )));
            }
        }
        Ok(())
    }
}
