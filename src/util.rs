/// Utility methods for the nianiolang completion server.
///
/// This module contains helpers for client logging, workspace/config
/// loading and read access used by tests.
use std::path::PathBuf;

use tower_lsp::lsp_types::*;
use tracing::info;

use crate::Backend;
use crate::config::Config;

impl Backend {
    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }

    /// Record the workspace root and (re)load its configuration file.
    pub(crate) fn load_workspace(&self, root: PathBuf) -> Config {
        let config = Config::load(&root).with_overrides(&self.overrides);
        info!(root = %root.display(), extension = %config.extension, "workspace loaded");
        *self.config.lock() = config.clone();
        *self.workspace_root.lock() = Some(root);
        config
    }

    /// Current effective configuration.
    pub fn get_config(&self) -> Config {
        self.config.lock().clone()
    }

    /// Current workspace root, if the client reported one.
    pub fn get_workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.lock().clone()
    }

    /// Public helper for tests: the stored text of an open document.
    pub fn get_open_file(&self, uri: &str) -> Option<String> {
        self.open_files.lock().get(uri).cloned()
    }
}
