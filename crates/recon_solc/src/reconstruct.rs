//! Folding artifacts into one compiler input/output pair.
//!
//! Artifacts are visited in the order given. Per source path, the first
//! artifact seen supplies the source text and the syntax tree; every
//! artifact contributes its own contract record, and a repeated
//! `(path, contract)` pair replaces the earlier record.

use std::collections::BTreeMap;

use recon_artifact::{Artifact, SyntaxTree};
use recon_source::ContentHash;

use crate::error::ReconstructError;
use crate::types::{CompilerInput, CompilerOutput, ContractOutput, InputSource, OutputSource};

/// How to treat artifacts that share a source path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourcePolicy {
    /// Keep the first artifact's text and assume the rest are identical.
    #[default]
    FirstWins,
    /// Fail if any later artifact carries different text for the path.
    RequireIdentical,
}

/// The reconstructed compiler input and output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconstructedIo {
    /// Source texts keyed by path.
    pub input: CompilerInput,
    /// Syntax trees and contracts keyed by path.
    pub output: CompilerOutput,
}

/// Merges `artifacts` into a compiler input/output pair.
///
/// Every artifact must carry a syntax tree; this is checked for the whole
/// collection before anything is built.
pub fn reconstruct(
    artifacts: &[Artifact],
    policy: SourcePolicy,
) -> Result<ReconstructedIo, ReconstructError> {
    let trees = artifacts
        .iter()
        .map(|artifact| {
            artifact
                .ast
                .as_ref()
                .ok_or_else(|| ReconstructError::MissingSyntaxTree {
                    contract: artifact.contract_name.clone(),
                    source_path: artifact.source_path.clone(),
                })
        })
        .collect::<Result<Vec<&SyntaxTree>, _>>()?;

    let mut io = ReconstructedIo::default();
    let mut first_text: BTreeMap<&str, (ContentHash, String)> = BTreeMap::new();

    for (artifact, tree) in artifacts.iter().zip(trees) {
        let path = artifact.source_path.as_str();

        if policy == SourcePolicy::RequireIdentical {
            let hash = ContentHash::of_text(&artifact.source);
            let (first_hash, first_label) = first_text
                .entry(path)
                .or_insert_with(|| (hash, artifact.label()));
            if *first_hash != hash {
                return Err(ReconstructError::SourceMismatch {
                    source_path: path.to_string(),
                    first: first_label.clone(),
                    conflicting: artifact.label(),
                });
            }
        }

        insert_if_absent(&mut io.input.sources, path, || InputSource {
            content: artifact.source.clone(),
        });

        let inserted = insert_if_absent(&mut io.output.sources, path, || OutputSource {
            ast: tree.clone(),
            id: tree.unit(),
        });
        if inserted {
            tracing::debug!(path, unit = %tree.unit(), "registered source unit");
        }

        let previous = io
            .output
            .contracts
            .entry(path.to_string())
            .or_default()
            .insert(
                artifact.contract_name.clone(),
                ContractOutput::from_bytecode(&artifact.bytecode),
            );
        if previous.is_some() {
            tracing::warn!(
                path,
                contract = %artifact.contract_name,
                artifact = %artifact.label(),
                "duplicate contract artifact replaces earlier record"
            );
        }
    }

    tracing::info!(
        sources = io.output.sources.len(),
        contracts = io.output.contract_count(),
        "reconstructed compiler output"
    );
    Ok(io)
}

/// Inserts `make()` under `key` unless the key is present.
///
/// Returns `true` if a value was inserted.
fn insert_if_absent<V>(
    map: &mut BTreeMap<String, V>,
    key: &str,
    make: impl FnOnce() -> V,
) -> bool {
    if map.contains_key(key) {
        return false;
    }
    map.insert(key.to_string(), make());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_source::SourceUnitId;
    use serde_json::json;

    fn tree(unit: u32) -> SyntaxTree {
        SyntaxTree::try_from(json!({
            "nodeType": "SourceUnit",
            "src": format!("0:10:{unit}"),
            "nodes": []
        }))
        .unwrap()
    }

    fn artifact(name: &str, path: &str, source: &str, unit: u32) -> Artifact {
        Artifact::new(name, path, source, "6080", Some(tree(unit)))
    }

    #[test]
    fn shared_path_yields_one_source_two_contracts() {
        let artifacts = vec![
            artifact("Token", "Token.sol", "contract Token {} contract Helper {}", 0),
            artifact("Helper", "Token.sol", "contract Token {} contract Helper {}", 0),
        ];
        let io = reconstruct(&artifacts, SourcePolicy::FirstWins).unwrap();
        assert_eq!(io.input.sources.len(), 1);
        assert_eq!(io.output.sources.len(), 1);
        let contracts = &io.output.contracts["Token.sol"];
        assert_eq!(contracts.len(), 2);
        assert!(contracts.contains_key("Token"));
        assert!(contracts.contains_key("Helper"));
    }

    #[test]
    fn source_id_comes_from_root_location() {
        let artifacts = vec![artifact("A", "A.sol", "a", 7)];
        let io = reconstruct(&artifacts, SourcePolicy::FirstWins).unwrap();
        assert_eq!(io.output.sources["A.sol"].id, SourceUnitId::from_raw(7));
    }

    #[test]
    fn first_writer_wins_for_source_text_and_tree() {
        let artifacts = vec![
            artifact("A", "A.sol", "first", 1),
            artifact("B", "A.sol", "second", 2),
        ];
        let io = reconstruct(&artifacts, SourcePolicy::FirstWins).unwrap();
        assert_eq!(io.input.sources["A.sol"].content, "first");
        assert_eq!(io.output.sources["A.sol"].id, SourceUnitId::from_raw(1));
    }

    #[test]
    fn last_writer_wins_for_duplicate_contract() {
        let mut second = artifact("A", "A.sol", "a", 0);
        second.bytecode = "6001".to_string();
        let artifacts = vec![artifact("A", "A.sol", "a", 0), second];
        let io = reconstruct(&artifacts, SourcePolicy::FirstWins).unwrap();
        assert_eq!(io.output.contract_count(), 1);
        assert_eq!(
            io.output.contracts["A.sol"]["A"].evm.bytecode.object,
            "6001"
        );
    }

    #[test]
    fn link_references_are_recovered() {
        let placeholder = format!("__Math{}", "_".repeat(34));
        let mut a = artifact("A", "A.sol", "a", 0);
        a.bytecode = format!("60{placeholder}");
        let io = reconstruct(&[a], SourcePolicy::FirstWins).unwrap();
        let refs = &io.output.contracts["A.sol"]["A"].evm.bytecode.link_references;
        assert_eq!(refs["*"]["Math"][0].start, 1);
    }

    #[test]
    fn missing_tree_fails_before_output() {
        let mut bad = artifact("Bad", "Bad.sol", "b", 1);
        bad.ast = None;
        let artifacts = vec![artifact("A", "A.sol", "a", 0), bad];
        match reconstruct(&artifacts, SourcePolicy::FirstWins) {
            Err(ReconstructError::MissingSyntaxTree { contract, .. }) => {
                assert_eq!(contract, "Bad")
            }
            other => panic!("expected MissingSyntaxTree, got {other:?}"),
        }
    }

    #[test]
    fn require_identical_accepts_matching_text() {
        let artifacts = vec![
            artifact("A", "A.sol", "same", 0),
            artifact("B", "A.sol", "same", 0),
        ];
        assert!(reconstruct(&artifacts, SourcePolicy::RequireIdentical).is_ok());
    }

    #[test]
    fn require_identical_rejects_diverging_text() {
        let artifacts = vec![
            artifact("A", "A.sol", "old", 0).with_origin("build/A.json"),
            artifact("B", "A.sol", "new", 0).with_origin("build/B.json"),
        ];
        match reconstruct(&artifacts, SourcePolicy::RequireIdentical) {
            Err(ReconstructError::SourceMismatch {
                source_path,
                first,
                conflicting,
            }) => {
                assert_eq!(source_path, "A.sol");
                assert_eq!(first, "build/A.json");
                assert_eq!(conflicting, "build/B.json");
            }
            other => panic!("expected SourceMismatch, got {other:?}"),
        }
    }

    #[test]
    fn reconstruction_is_repeatable() {
        let artifacts = vec![
            artifact("A", "A.sol", "a", 0),
            artifact("B", "B.sol", "b", 1),
            artifact("C", "B.sol", "b", 1),
        ];
        let first = reconstruct(&artifacts, SourcePolicy::FirstWins).unwrap();
        let second = reconstruct(&artifacts, SourcePolicy::FirstWins).unwrap();
        assert_eq!(first, second);

        let mut reversed = artifacts.clone();
        reversed.reverse();
        let third = reconstruct(&reversed, SourcePolicy::FirstWins).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn empty_collection() {
        let io = reconstruct(&[], SourcePolicy::FirstWins).unwrap();
        assert!(io.input.sources.is_empty());
        assert!(io.output.contracts.is_empty());
    }

    #[test]
    fn insert_if_absent_keeps_existing() {
        let mut map = BTreeMap::new();
        assert!(insert_if_absent(&mut map, "k", || 1));
        assert!(!insert_if_absent(&mut map, "k", || 2));
        assert_eq!(map["k"], 1);
    }
}
