/// Server configuration.
///
/// Settings come from two places, later ones winning:
///   1. `.nianio-lsp.toml` at the workspace root (optional)
///   2. Command-line flags passed to the server binary
///
/// ```toml
/// root = "src"        # search root, relative to the workspace
/// extension = "nl"    # module file extension
/// max_depth = 32      # nested type unwrapping bound
/// ```
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::{DEFAULT_EXTENSION, DEFAULT_MAX_DEPTH, ResolveContext};

/// Name of the per-workspace configuration file.
pub const CONFIG_FILE_NAME: &str = ".nianio-lsp.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Module search root.  Relative paths are taken from the workspace root.
    pub root: Option<PathBuf>,
    /// Module file extension without the dot.
    pub extension: String,
    /// Maximum nesting followed while resolving a field chain.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Values given on the command line; each one overrides the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub extension: Option<String>,
    pub max_depth: Option<usize>,
}

impl Config {
    /// Parse configuration text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `.nianio-lsp.toml` from `workspace_root`, falling back to the
    /// defaults when it is missing or malformed.
    pub fn load(workspace_root: &Path) -> Self {
        let path = workspace_root.join(CONFIG_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
        };

        let mut config = match Self::from_toml(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring malformed config file");
                return Self::default();
            }
        };

        if let Some(root) = config.root.take() {
            config.root = Some(workspace_root.join(root));
        }
        config
    }

    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(root) = &overrides.root {
            self.root = Some(root.clone());
        }
        if let Some(extension) = &overrides.extension {
            self.extension = extension.clone();
        }
        if let Some(max_depth) = overrides.max_depth {
            self.max_depth = max_depth;
        }
        self
    }

    /// Whether completion is offered for the file at `path`.
    pub fn handles_file(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.extension.as_str())
    }

    /// Build the resolution context for a buffer.
    ///
    /// The search root is the configured root if any, else the workspace
    /// root, else the directory holding the buffer.
    pub fn resolve_context(&self, workspace_root: Option<&Path>, file_path: &Path) -> ResolveContext {
        let root = self
            .root
            .clone()
            .or_else(|| workspace_root.map(Path::to_path_buf))
            .or_else(|| file_path.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        ResolveContext::new(root)
            .with_extension(self.extension.clone())
            .with_max_depth(self.max_depth)
    }
}
