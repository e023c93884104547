//! Data types used throughout the nianiolang completion server.
//!
//! This module contains the "model" structs and enums shared by the
//! resolution engine (field descriptors, access chains, the resolution
//! context) and by the completion layer (requests and candidates), plus
//! the tagged error type every resolution step returns.
use std::path::{Path, PathBuf};

/// Default source file extension of a nianiolang module.
pub const DEFAULT_EXTENSION: &str = "nl";

/// Default bound on nested type unwrapping during chain resolution.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Explicit context threaded through every resolution call.
///
/// Nothing about a request is stored on the `Backend`; each recursive step
/// receives the search root (and the knobs that go with it) by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    /// Directory searched recursively for module files.
    pub root: PathBuf,
    /// Module file extension without the leading dot (e.g. `"nl"`).
    pub extension: String,
    /// Maximum number of nested unwrap/descend steps before giving up.
    pub max_depth: usize,
}

impl ResolveContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// The value side of a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A named type reference written as `@module::name`; holds the
    /// qualified name without the `@` marker. Resolved on demand through
    /// the type definition resolver.
    Reference(String),
    /// An inline type definition such as `ptd::arr(ptd::sim())`.
    Inline(String),
}

/// One field of a record type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field name (e.g. `"x"`).
    pub key: String,
    /// The field's type definition or reference.
    pub value: FieldValue,
    /// Raw type annotation shown next to the candidate
    /// (e.g. `"ptd::sim"` or `"@geo::Point"`).
    pub type_text: String,
}

/// Which completion strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// A function name after `module::`.
    Function,
    /// A record field name after `->`.
    Field,
}

/// A single completion suggestion, independent of the LSP wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Text inserted when the candidate is accepted.
    pub insertion_text: String,
    /// Optional short type annotation for display.
    pub extra_info: Option<String>,
    pub kind: CandidateKind,
}

impl CompletionCandidate {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            insertion_text: name.into(),
            extra_info: None,
            kind: CandidateKind::Function,
        }
    }

    pub fn field(field: &FieldDescriptor) -> Self {
        Self {
            insertion_text: field.key.clone(),
            extra_info: Some(field.type_text.clone()),
            kind: CandidateKind::Field,
        }
    }
}

/// Everything the orchestrator needs to know about one completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Caret column, counted in characters from the start of the line.
    pub column: usize,
    /// Raw text of the caret's line.
    pub line_text: String,
    /// Full contents of the buffer being edited.
    pub buffer: String,
    /// 1-based line number of the caret.
    pub line_number: usize,
    /// Absolute path of the buffer on disk.
    pub file_path: PathBuf,
    /// Search root and resolution settings.
    pub context: ResolveContext,
}

/// Why a resolution step produced nothing.
///
/// None of these ever reach the editor: the orchestrator turns them into
/// an empty candidate list. They exist so callers and tests can tell the
/// failure modes apart.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no module file found for `{module}`")]
    ModuleNotFound { module: String },
    #[error("no declaration found for `{name}`")]
    DeclarationNotFound { name: String },
    #[error("unbalanced delimiter at offset {offset}")]
    UnbalancedDelimiters { offset: usize },
    #[error("unrecognized type definition `{text}`")]
    UnrecognizedTypeForm { text: String },
    #[error("variable `{name}` has no visible declaration")]
    VariableNotDeclared { name: String },
    #[error("record has no field `{field}`")]
    FieldNotFound { field: String },
    #[error("type nesting exceeds {depth} levels")]
    RecursionLimit { depth: usize },
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
