//! User configuration for gwt.
//!
//! Configuration is optional. gwt looks for a TOML file at the path given by
//! `--config` / `GWT_CONFIG`, falling back to `<config dir>/gwt/config.toml`
//! (`~/.config/gwt/config.toml` on Linux). Every field is optional and merges
//! over the defaults:
//!
//! ```toml
//! default-branches = ["main", "master"]
//! label-width = 20
//!
//! [picker]
//! style = "fuzzy"   # or "list"
//! preview = true
//! ```
//!
//! A missing, blank or unparsable file never stops gwt: it falls back to the
//! defaults, warning about syntax errors.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::worktree::ParseOptions;
use crate::worktree::parse::DEFAULT_LABEL_WIDTH;

/// Which picker drives interactive selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickerStyle {
    /// skim fuzzy finder with a status preview pane
    #[default]
    Fuzzy,
    /// inquire select list with type-to-filter, no preview
    List,
}

/// Fully resolved configuration used by the commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GwtConfig {
    /// Branches tried in order by `gwt main`
    pub default_branches: Vec<String>,
    /// Minimum width of the worktree name column in picker labels
    pub label_width: usize,
    pub picker: PickerStyle,
    /// Show `git status --short` of the highlighted worktree
    pub preview: bool,
}

impl Default for GwtConfig {
    fn default() -> Self {
        Self {
            default_branches: Self::default_branches(),
            label_width: DEFAULT_LABEL_WIDTH,
            picker: PickerStyle::default(),
            preview: true,
        }
    }
}

/// On-disk shape of the config file; all fields optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub default_branches: Option<Vec<String>>,
    #[serde(default)]
    pub label_width: Option<usize>,
    #[serde(default)]
    pub picker: Option<PickerSection>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PickerSection {
    #[serde(default)]
    pub style: Option<PickerStyle>,
    #[serde(default)]
    pub preview: Option<bool>,
}

impl GwtConfig {
    fn default_branches() -> Vec<String> {
        vec!["main".to_string(), "master".to_string()]
    }

    /// Default location of the config file, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gwt").join("config.toml"))
    }

    /// Loads configuration from `path`, or from [`GwtConfig::default_path`].
    ///
    /// # Errors
    /// Only file system failures other than a missing file are errors; bad TOML
    /// falls back to defaults with a warning.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        Self::load_from_file(&path)
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Ok(Self::from_toml(&content, path))
    }

    fn from_toml(content: &str, origin: &Path) -> Self {
        if content.trim().is_empty() {
            return Self::default();
        }

        match toml::from_str::<ConfigFile>(content) {
            Ok(file) => Self::default().merged_with(file),
            Err(e) => {
                log::warn!(
                    "Invalid config in {}, using defaults: {}",
                    origin.display(),
                    e.message()
                );
                Self::default()
            }
        }
    }

    /// Overlays the fields set in `file` on top of `self`.
    #[must_use]
    pub fn merged_with(mut self, file: ConfigFile) -> Self {
        if let Some(branches) = file.default_branches {
            // An empty list would make `gwt main` always land on the root
            if branches.is_empty() {
                log::warn!("default-branches is empty, keeping {:?}", self.default_branches);
            } else {
                self.default_branches = branches;
            }
        }
        if let Some(width) = file.label_width {
            self.label_width = width;
        }
        if let Some(picker) = file.picker {
            if let Some(style) = picker.style {
                self.picker = style;
            }
            if let Some(preview) = picker.preview {
                self.preview = preview;
            }
        }
        self
    }

    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            label_width: self.label_width,
        }
    }
}
