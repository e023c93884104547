/// Module file lookup.
///
/// A nianiolang module `geo` lives in a file named `geo.nl` somewhere
/// below the search root.  There is no manifest mapping modules to paths,
/// so the whole tree is walked on every lookup:
///
///   1. Build the expected file name (`<module>.<extension>`)
///   2. Walk the root recursively, collecting every file with that name
///   3. Pick the shallowest match, breaking ties by lexical path order
///
/// The walk deliberately disables `.gitignore`/hidden-file filtering so a
/// module is found regardless of VCS configuration.
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, trace};

use crate::types::{ResolveContext, ResolveError};

/// Locate the source file of `module` under the context's root.
pub fn find_module_file(ctx: &ResolveContext, module: &str) -> Result<PathBuf, ResolveError> {
    let file_name = format!("{}.{}", module, ctx.extension);
    let mut matches = collect_named_files(ctx.root(), &file_name);

    if matches.is_empty() {
        return Err(ResolveError::ModuleNotFound {
            module: module.to_string(),
        });
    }

    matches.sort_by(|a, b| {
        a.components()
            .count()
            .cmp(&b.components().count())
            .then_with(|| a.cmp(b))
    });

    if matches.len() > 1 {
        debug!(
            module,
            candidates = matches.len(),
            chosen = %matches[0].display(),
            "ambiguous module file name"
        );
    }

    Ok(matches.swap_remove(0))
}

/// Read a module's source text, locating it first.
pub fn read_module(ctx: &ResolveContext, module: &str) -> Result<String, ResolveError> {
    let path = find_module_file(ctx, module)?;
    trace!(module, path = %path.display(), "reading module");
    std::fs::read_to_string(&path).map_err(|source| ResolveError::Io { path, source })
}

fn collect_named_files(root: &Path, file_name: &str) -> Vec<PathBuf> {
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| entry.file_name() == file_name)
        .map(|entry| entry.into_path())
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
