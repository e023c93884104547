/// Completion-related modules.
///
/// This sub-module groups all completion logic:
/// - **target**: Extracting the token before the caret and classifying it
/// - **variable**: Finding the declared type of a chain's root variable
/// - **handler**: Dispatching a request to the matching strategy
/// - **builder**: Building LSP `CompletionItem`s from candidates
pub mod builder;
pub mod handler;
pub mod target;
pub mod variable;
