//! Typed artifact records.

use std::path::PathBuf;

use recon_source::{SourceLocation, SourceUnitId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SyntaxTreeError;

/// The syntax tree of one source unit, as embedded in an artifact.
///
/// The tree itself is kept as raw JSON so it can be handed to validators
/// untouched; only the root `src` descriptor is validated and parsed on the
/// way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct SyntaxTree {
    root: Value,
    location: SourceLocation,
}

impl SyntaxTree {
    /// Returns the raw root node.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns the compilation unit the tree describes.
    pub fn unit(&self) -> SourceUnitId {
        self.location.unit
    }
}

impl TryFrom<Value> for SyntaxTree {
    type Error = SyntaxTreeError;

    fn try_from(root: Value) -> Result<Self, Self::Error> {
        let node = root.as_object().ok_or(SyntaxTreeError::NotAnObject)?;
        let src = node
            .get("src")
            .and_then(Value::as_str)
            .ok_or(SyntaxTreeError::MissingLocation)?;
        let location = src.parse()?;
        Ok(Self { root, location })
    }
}

impl From<SyntaxTree> for Value {
    fn from(tree: SyntaxTree) -> Self {
        tree.root
    }
}

/// A build artifact for one compiled contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The contract name, unique within its source file.
    pub contract_name: String,

    /// Logical path of the source file the contract was compiled from.
    pub source_path: String,

    /// Full text of the source file.
    pub source: String,

    /// Hex-encoded creation bytecode, possibly containing link placeholders.
    pub bytecode: String,

    /// Syntax tree of the source file; required for reconstruction.
    #[serde(default)]
    pub ast: Option<SyntaxTree>,

    /// File the record was read from.
    #[serde(skip)]
    pub origin: Option<PathBuf>,
}

impl Artifact {
    /// Creates an artifact record not backed by a file.
    pub fn new(
        contract_name: impl Into<String>,
        source_path: impl Into<String>,
        source: impl Into<String>,
        bytecode: impl Into<String>,
        ast: Option<SyntaxTree>,
    ) -> Self {
        Self {
            contract_name: contract_name.into(),
            source_path: source_path.into(),
            source: source.into(),
            bytecode: bytecode.into(),
            ast,
            origin: None,
        }
    }

    /// Records the file this artifact was read from.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// A short label for messages: the origin file if known, else the contract name.
    pub fn label(&self) -> String {
        match &self.origin {
            Some(path) => path.display().to_string(),
            None => self.contract_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn syntax_tree_from_source_unit() {
        let tree = SyntaxTree::try_from(json!({
            "nodeType": "SourceUnit",
            "id": 118,
            "src": "0:512:4",
            "nodes": []
        }))
        .unwrap();
        assert_eq!(tree.unit(), SourceUnitId::from_raw(4));
        assert_eq!(tree.location.length, 512);
        assert_eq!(tree.root()["nodeType"], "SourceUnit");
    }

    #[test]
    fn syntax_tree_requires_object() {
        assert_eq!(
            SyntaxTree::try_from(json!([1, 2])).unwrap_err(),
            SyntaxTreeError::NotAnObject
        );
    }

    #[test]
    fn syntax_tree_requires_src() {
        assert_eq!(
            SyntaxTree::try_from(json!({"nodeType": "SourceUnit"})).unwrap_err(),
            SyntaxTreeError::MissingLocation
        );
    }

    #[test]
    fn syntax_tree_rejects_bad_src() {
        let err = SyntaxTree::try_from(json!({"src": "0:10"})).unwrap_err();
        assert!(matches!(err, SyntaxTreeError::InvalidLocation(_)));
    }

    #[test]
    fn syntax_tree_serializes_as_raw_tree() {
        let raw = json!({"nodeType": "SourceUnit", "src": "0:1:0", "nodes": []});
        let tree = SyntaxTree::try_from(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&tree).unwrap(), raw);
    }

    #[test]
    fn artifact_deserializes_camel_case() {
        let artifact: Artifact = serde_json::from_value(json!({
            "contractName": "Token",
            "sourcePath": "/proj/contracts/Token.sol",
            "source": "contract Token {}",
            "bytecode": "0x6080",
            "abi": [],
            "ast": {"nodeType": "SourceUnit", "src": "0:17:0", "nodes": []}
        }))
        .unwrap();
        assert_eq!(artifact.contract_name, "Token");
        assert_eq!(artifact.source_path, "/proj/contracts/Token.sol");
        assert!(artifact.ast.is_some());
        assert!(artifact.origin.is_none());
    }

    #[test]
    fn artifact_null_ast_is_none() {
        let artifact: Artifact = serde_json::from_value(json!({
            "contractName": "Token",
            "sourcePath": "Token.sol",
            "source": "",
            "bytecode": "0x",
            "ast": null
        }))
        .unwrap();
        assert!(artifact.ast.is_none());
    }

    #[test]
    fn artifact_missing_bytecode_fails() {
        let result: Result<Artifact, _> = serde_json::from_value(json!({
            "contractName": "Token",
            "sourcePath": "Token.sol",
            "source": ""
        }));
        assert!(result.is_err());
    }

    #[test]
    fn label_prefers_origin() {
        let artifact = Artifact::new("Token", "Token.sol", "", "0x", None);
        assert_eq!(artifact.label(), "Token");
        let artifact = artifact.with_origin("build/Token.json");
        assert_eq!(artifact.label(), "build/Token.json");
    }
}
