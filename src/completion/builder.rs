/// Completion item building.
///
/// Converts resolved [`CompletionCandidate`]s into LSP `CompletionItem`s.
/// Field candidates carry their type annotation in `detail` so the popup
/// shows e.g. `x  ptd::sim`.
use tower_lsp::lsp_types::*;

use crate::types::{CandidateKind, CompletionCandidate};

pub fn build_completion_item(candidate: &CompletionCandidate) -> CompletionItem {
    let kind = match candidate.kind {
        CandidateKind::Function => CompletionItemKind::FUNCTION,
        CandidateKind::Field => CompletionItemKind::FIELD,
    };

    CompletionItem {
        label: candidate.insertion_text.clone(),
        kind: Some(kind),
        detail: candidate.extra_info.clone(),
        insert_text: Some(candidate.insertion_text.clone()),
        filter_text: Some(candidate.insertion_text.clone()),
        ..CompletionItem::default()
    }
}

/// Build items in candidate order, with `sort_text` pinning that order.
pub fn build_completion_items(candidates: &[CompletionCandidate]) -> Vec<CompletionItem> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| CompletionItem {
            sort_text: Some(format!("{:04}", i)),
            ..build_completion_item(candidate)
        })
        .collect()
}
