/// Completion request orchestration.
///
/// [`try_compute_candidates`] classifies the token before the caret and
/// dispatches to the matching strategy:
///
/// - **qualified name** (`geo::dis`): list matching `def`s in the module
/// - **field chain** (`route->from->`): find the root variable's declared
///   type, resolve it to a definition and walk the chain through it
///
/// [`compute_candidates`] is the editor-facing wrapper: any failure is
/// logged and turned into an empty list, since a missing suggestion must
/// never interrupt typing.  `Backend::handle_completion` adapts an LSP
/// request into a [`CompletionRequest`] and back.
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{debug, warn};

use crate::Backend;
use crate::completion::builder::build_completion_items;
use crate::completion::target::{
    AccessChain, CompletionTarget, classify_token, extract_last_token, utf16_to_char_column,
};
use crate::completion::variable::find_variable_type;
use crate::parser::functions::find_functions;
use crate::parser::resolve_type_definition;
use crate::resolution::resolve_chain;
use crate::types::{CompletionCandidate, CompletionRequest, ResolveContext, ResolveError};

/// Compute candidates, reporting why nothing was found.
pub fn try_compute_candidates(
    request: &CompletionRequest,
) -> std::result::Result<Vec<CompletionCandidate>, ResolveError> {
    let token = extract_last_token(&request.line_text, request.column);

    match classify_token(&token) {
        Some(CompletionTarget::QualifiedName(name)) => find_functions(&request.context, &name),
        Some(CompletionTarget::FieldChain(chain)) => find_fields(
            &request.context,
            &request.buffer,
            request.line_number,
            &chain,
        ),
        None => Ok(Vec::new()),
    }
}

/// Compute candidates, absorbing every failure into an empty list.
pub fn compute_candidates(request: &CompletionRequest) -> Vec<CompletionCandidate> {
    try_compute_candidates(request).unwrap_or_else(|err| {
        debug!(
            file = %request.file_path.display(),
            line = request.line_number,
            error = %err,
            "no completions"
        );
        Vec::new()
    })
}

/// Resolve the fields offered after the last `->` of `chain`.
pub fn find_fields(
    ctx: &ResolveContext,
    buffer: &str,
    line_number: usize,
    chain: &AccessChain,
) -> std::result::Result<Vec<CompletionCandidate>, ResolveError> {
    let type_name = find_variable_type(buffer, line_number, &chain.variable)?;
    let type_def = resolve_type_definition(ctx, &type_name)?;
    let fields = resolve_chain(ctx, &type_def, &chain.fields)?;
    Ok(fields.iter().map(CompletionCandidate::field).collect())
}

impl Backend {
    /// Main completion handler — called by `LanguageServer::completion`.
    pub(crate) async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Ok(file_path) = uri.to_file_path() else {
            return Ok(None);
        };

        let config = self.config.lock().clone();
        if !config.handles_file(&file_path) {
            return Ok(None);
        }

        let content = self.open_files.lock().get(uri.as_str()).cloned();
        let Some(content) = content else {
            return Ok(None);
        };

        let line_text = content
            .lines()
            .nth(position.line as usize)
            .unwrap_or_default()
            .to_string();

        let workspace_root = self.workspace_root.lock().clone();
        let context = config.resolve_context(workspace_root.as_deref(), &file_path);

        let request = CompletionRequest {
            column: utf16_to_char_column(&line_text, position.character as usize),
            line_text,
            buffer: content,
            line_number: position.line as usize + 1,
            file_path,
            context,
        };

        // Module lookup walks the file tree; keep it off the message loop.
        let task = tokio::task::spawn_blocking(move || compute_candidates(&request));
        let candidates = match task.await {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "completion task failed");
                return Ok(None);
            }
        };
        if candidates.is_empty() {
            return Ok(None);
        }

        Ok(Some(CompletionResponse::Array(build_completion_items(
            &candidates,
        ))))
    }
}
