//! Cross-artifact import consistency.
//!
//! Each import directive records the unit id its target had when the
//! importing file was compiled. If the target's own artifact carries a
//! different id, the two artifacts come from different compiler runs.

use crate::ast::{find_all, ImportDirective, NodeView};
use crate::error::ReconstructError;
use crate::types::CompilerOutput;

/// Verifies that every import whose target is part of `output` resolves to
/// the target's recorded unit id.
///
/// Imports of files with no artifact are outside the checked set and are
/// skipped, as are directives whose `absolutePath` or `sourceUnit` is
/// missing or ill-typed. Stops at the first mismatch.
pub fn check_imports(output: &CompilerOutput) -> Result<(), ReconstructError> {
    let mut checked = 0usize;

    for (importer, source) in &output.sources {
        for node in find_all(ImportDirective::NODE_TYPE, source.ast.root()) {
            let Some(import) = ImportDirective::from_node(node) else {
                tracing::debug!(
                    importer = %importer,
                    src = node.get("src").and_then(|s| s.as_str()).unwrap_or("?"),
                    "import directive without usable absolutePath/sourceUnit, skipping"
                );
                continue;
            };
            let Some(target) = output.sources.get(&import.absolute_path) else {
                tracing::debug!(
                    importer = %importer,
                    import = %import.absolute_path,
                    "import target has no artifact, skipping"
                );
                continue;
            };

            if i64::from(target.id.as_raw()) != import.source_unit {
                return Err(ReconstructError::InconsistentCompilation {
                    importer: importer.clone(),
                    import_path: import.absolute_path,
                    expected: import.source_unit,
                    actual: target.id,
                });
            }
            checked += 1;
        }
    }

    tracing::info!(imports = checked, "import consistency verified");
    Ok(())
}
