//! Completion server for nianiolang.
//!
//! Suggestions are computed from module sources on disk without a full
//! parser: qualified function names are found by scanning `def` lines, and
//! field-access chains are resolved by walking the textual `ptd::` type
//! definitions.  The engine (everything outside `server` and
//! `completion::handler`'s `Backend` impl) is synchronous and stateless;
//! every request reads what it needs from disk.
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tower_lsp::Client;

pub mod completion;
pub mod config;
pub mod delimiter;
pub mod module_locator;
pub mod parser;
pub mod resolution;
mod server;
pub mod types;
mod util;

pub use completion::handler::{compute_candidates, try_compute_candidates};
pub use config::{Config, ConfigOverrides};
pub use types::*;

pub struct Backend {
    name: String,
    version: String,
    /// Open buffers keyed by document URI.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    /// Workspace root reported by the client in `initialize`.
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    /// Effective configuration (file merged with `overrides`).
    config: Arc<Mutex<Config>>,
    /// Command-line settings, re-applied whenever the config is reloaded.
    overrides: ConfigOverrides,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client, overrides: ConfigOverrides) -> Self {
        Self {
            client: Some(client),
            ..Self::with_overrides(overrides)
        }
    }

    /// A backend with no client attached, for tests.
    pub fn new_test() -> Self {
        Self::with_overrides(ConfigOverrides::default())
    }

    /// A test backend whose workspace root is already known.
    pub fn new_test_with_workspace(workspace_root: PathBuf) -> Self {
        let backend = Self::new_test();
        backend.load_workspace(workspace_root);
        backend
    }

    fn with_overrides(overrides: ConfigOverrides) -> Self {
        Self {
            name: "NianioLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            config: Arc::new(Mutex::new(Config::default().with_overrides(&overrides))),
            overrides,
            client: None,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }
}
