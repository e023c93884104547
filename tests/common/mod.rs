#![allow(dead_code)]

use nianio_lsp::Backend;
use std::fs;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

/// Helper: create a temp workspace with nianiolang module files, then
/// return a Backend configured with that workspace root.
pub fn create_workspace(files: &[(&str, &str)]) -> (Backend, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write module file");
    }

    let backend = Backend::new_test_with_workspace(dir.path().to_path_buf());
    (backend, dir)
}

/// Helper: open `text` as `rel_path` inside the workspace and request
/// completion at `(line, character)`.  Returns the item labels and details.
pub async fn complete_at(
    backend: &Backend,
    dir: &tempfile::TempDir,
    rel_path: &str,
    text: &str,
    line: u32,
    character: u32,
) -> Vec<(String, Option<String>)> {
    let uri = Url::from_file_path(dir.path().join(rel_path)).expect("absolute path");
    let open_params = DidOpenTextDocumentParams {
        text_document: TextDocumentItem {
            uri: uri.clone(),
            language_id: "nianiolang".to_string(),
            version: 1,
            text: text.to_string(),
        },
    };
    backend.did_open(open_params).await;

    let completion_params = CompletionParams {
        text_document_position: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri },
            position: Position { line, character },
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
        context: None,
    };

    match backend.completion(completion_params).await.unwrap() {
        Some(CompletionResponse::Array(items)) => items
            .into_iter()
            .map(|i| (i.label, i.detail))
            .collect(),
        Some(_) => panic!("Expected CompletionResponse::Array"),
        None => Vec::new(),
    }
}

/// Labels only.
pub fn labels(items: &[(String, Option<String>)]) -> Vec<&str> {
    items.iter().map(|(label, _)| label.as_str()).collect()
}
