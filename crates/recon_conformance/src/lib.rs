//! Conformance test helpers for artifact reconstruction.
//!
//! Provides a builder for Truffle-style artifact records and a throwaway
//! project directory to write them into, so integration tests can drive the
//! full load → reconstruct → check → validate pipeline from disk.

#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use recon_artifact::Artifact;
use recon_solc::Pipeline;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Width of a library placeholder in hex characters.
pub const PLACEHOLDER_WIDTH: usize = 40;

/// Builds a library placeholder padded with underscores to full width.
pub fn placeholder(library: &str) -> String {
    let mut p = format!("__{library}");
    while p.len() < PLACEHOLDER_WIDTH {
        p.push('_');
    }
    p
}

/// Builder for one artifact record.
#[derive(Debug, Clone)]
pub struct ArtifactBuilder {
    name: String,
    source_path: String,
    source: String,
    bytecode: String,
    unit: u32,
    imports: Vec<(String, i64)>,
    with_ast: bool,
}

impl ArtifactBuilder {
    /// Starts an artifact for contract `name` in `source_path`, compiled as
    /// unit `unit`.
    pub fn new(name: &str, source_path: &str, unit: u32) -> Self {
        Self {
            name: name.to_string(),
            source_path: source_path.to_string(),
            source: format!("pragma solidity ^0.6.0;\ncontract {name} {{}}\n"),
            bytecode: "6080604052".to_string(),
            unit,
            imports: Vec::new(),
            with_ast: true,
        }
    }

    /// Sets the source text.
    pub fn source(mut self, text: &str) -> Self {
        self.source = text.to_string();
        self
    }

    /// Sets the bytecode string.
    pub fn bytecode(mut self, bytecode: &str) -> Self {
        self.bytecode = bytecode.to_string();
        self
    }

    /// Adds an import of `path`, recorded as resolving to unit `unit`.
    pub fn import(mut self, path: &str, unit: i64) -> Self {
        self.imports.push((path.to_string(), unit));
        self
    }

    /// Drops the syntax tree from the record.
    pub fn without_ast(mut self) -> Self {
        self.with_ast = false;
        self
    }

    /// Returns the file name the record is written under.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    /// Returns the syntax tree: a source unit holding the imports and one
    /// contract definition that spans the last source line.
    pub fn ast(&self) -> Value {
        let unit = self.unit;
        let len = self.source.len();
        let decl_start = self.source.trim_end().rfind('\n').map_or(0, |i| i + 1);
        let decl_len = self.source.trim_end().len() - decl_start;

        let mut nodes: Vec<Value> = self
            .imports
            .iter()
            .enumerate()
            .map(|(i, (path, target))| {
                json!({
                    "nodeType": "ImportDirective",
                    "id": i + 1,
                    "absolutePath": path,
                    "file": path,
                    "sourceUnit": target,
                    "src": format!("0:0:{unit}")
                })
            })
            .collect();
        nodes.push(json!({
            "nodeType": "ContractDefinition",
            "name": self.name,
            "contractKind": "contract",
            "src": format!("{decl_start}:{decl_len}:{unit}")
        }));

        json!({
            "nodeType": "SourceUnit",
            "id": 1000 + unit,
            "absolutePath": self.source_path,
            "src": format!("0:{len}:{unit}"),
            "nodes": nodes
        })
    }

    /// Returns the record as artifact JSON.
    pub fn to_json(&self) -> Value {
        let mut record = json!({
            "contractName": self.name,
            "sourcePath": self.source_path,
            "source": self.source,
            "bytecode": self.bytecode,
            "compiler": {"name": "solc", "version": "0.6.12+commit.27d51765"}
        });
        if self.with_ast {
            record["ast"] = self.ast();
        }
        record
    }

    /// Parses the record into an in-memory [`Artifact`].
    pub fn build(&self) -> Artifact {
        serde_json::from_value(self.to_json()).expect("builder emits valid artifacts")
    }
}

/// A temporary project with an artifact directory and a source directory.
pub struct Project {
    root: TempDir,
}

impl Project {
    /// Creates an empty project.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("build/contracts")).expect("create build dir");
        std::fs::create_dir_all(root.path().join("contracts")).expect("create sources dir");
        Self { root }
    }

    /// Returns the project root.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Returns the artifact directory.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.path().join("build/contracts")
    }

    /// Returns the source directory.
    pub fn sources_dir(&self) -> PathBuf {
        self.root.path().join("contracts")
    }

    /// Absolute path of `name` inside the source directory, as Truffle
    /// records it in `sourcePath`.
    pub fn source_path(&self, name: &str) -> String {
        self.sources_dir().join(name).display().to_string()
    }

    /// Writes an artifact under its default file name.
    pub fn write(&self, artifact: &ArtifactBuilder) -> PathBuf {
        self.write_as(&artifact.file_name(), artifact)
    }

    /// Writes an artifact under `file_name`.
    pub fn write_as(&self, file_name: &str, artifact: &ArtifactBuilder) -> PathBuf {
        let text = serde_json::to_string_pretty(&artifact.to_json()).expect("serialize artifact");
        self.write_raw(file_name, &text)
    }

    /// Writes arbitrary text into the artifact directory.
    pub fn write_raw(&self, file_name: &str, text: &str) -> PathBuf {
        let path = self.artifacts_dir().join(file_name);
        std::fs::write(&path, text).expect("write artifact");
        path
    }

    /// Returns a single-threaded pipeline over this project.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.artifacts_dir(), self.sources_dir()).jobs(1)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
