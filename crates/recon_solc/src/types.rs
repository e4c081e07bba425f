//! Compiler standard-JSON input and output shapes.
//!
//! Only the subset consumed by upgrade-safety validation is modelled. Field
//! names serialize exactly as the compiler emits them.

use std::collections::BTreeMap;

use recon_artifact::SyntaxTree;
use recon_source::SourceUnitId;
use serde::{Deserialize, Serialize};

use crate::link;

/// Library link references: group → library name → occurrences.
///
/// Artifacts do not record which file defines a library, so every entry sits
/// under the single [`UNKNOWN_SOURCE_GROUP`](crate::link::UNKNOWN_SOURCE_GROUP).
pub type LinkReferences = BTreeMap<String, BTreeMap<String, Vec<LinkReference>>>;

/// One occurrence of a library address placeholder in bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReference {
    /// Byte offset of the placeholder within the bytecode.
    pub start: usize,
    /// Width of the placeholder in bytes (always the address width).
    pub length: usize,
}

/// Compiler input: the source text of every file, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerInput {
    /// Source files keyed by their logical path.
    pub sources: BTreeMap<String, InputSource>,
}

/// One source file of the compiler input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSource {
    /// Full source text.
    pub content: String,
}

/// Compiler output: per-file syntax trees and per-contract bytecode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerOutput {
    /// Syntax tree and unit id for every file, keyed by path.
    pub sources: BTreeMap<String, OutputSource>,
    /// Contracts keyed by source path, then by contract name.
    pub contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,
}

impl CompilerOutput {
    /// Iterates over `(source path, contract name, contract)` triples.
    pub fn iter_contracts(&self) -> impl Iterator<Item = (&str, &str, &ContractOutput)> {
        self.contracts.iter().flat_map(|(path, contracts)| {
            contracts
                .iter()
                .map(move |(name, contract)| (path.as_str(), name.as_str(), contract))
        })
    }

    /// Returns the number of contract records across all files.
    pub fn contract_count(&self) -> usize {
        self.contracts.values().map(BTreeMap::len).sum()
    }
}

/// One source file of the compiler output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSource {
    /// The file's syntax tree.
    pub ast: SyntaxTree,
    /// The file's compilation unit id.
    pub id: SourceUnitId,
}

/// Output for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractOutput {
    /// EVM-specific output.
    pub evm: EvmOutput,
}

impl ContractOutput {
    /// Builds a contract record from unlinked bytecode, recovering its link references.
    pub fn from_bytecode(bytecode: &str) -> Self {
        Self {
            evm: EvmOutput {
                bytecode: Bytecode {
                    object: bytecode.to_string(),
                    link_references: link::scan(bytecode),
                },
            },
        }
    }
}

/// EVM output of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmOutput {
    /// Creation bytecode.
    pub bytecode: Bytecode,
}

/// Bytecode object together with its unresolved library references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bytecode {
    /// Hex-encoded bytecode, placeholders included.
    pub object: String,
    /// Where each library address must be linked in.
    pub link_references: LinkReferences,
}
