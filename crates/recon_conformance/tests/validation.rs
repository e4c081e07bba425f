//! Handing reconstructed output to a validator, and decoding locations.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use recon_conformance::{placeholder, ArtifactBuilder, Project};
use recon_solc::ast::{find_typed, ContractDefinition};
use recon_solc::{
    validate_artifacts, CompilerOutput, PipelineError, SourceDecoder, Validator,
};

/// Reports where each contract is declared.
struct DeclarationSites;

impl Validator for DeclarationSites {
    type Report = String;
    type Error = fmt::Error;

    fn validate(
        &self,
        output: &CompilerOutput,
        decoder: &SourceDecoder,
    ) -> Result<BTreeMap<String, String>, fmt::Error> {
        let mut sites = BTreeMap::new();
        for source in output.sources.values() {
            for def in find_typed::<ContractDefinition>(source.ast.root()) {
                let site = decoder.decode_src(&def.src).ok_or(fmt::Error)?;
                sites.insert(def.name, site.to_string());
            }
        }
        Ok(sites)
    }
}

/// Counts library references per contract.
struct LinkCount;

impl Validator for LinkCount {
    type Report = usize;
    type Error = fmt::Error;

    fn validate(
        &self,
        output: &CompilerOutput,
        _decoder: &SourceDecoder,
    ) -> Result<BTreeMap<String, usize>, fmt::Error> {
        Ok(output
            .iter_contracts()
            .map(|(_, name, contract)| {
                let refs = contract
                    .evm
                    .bytecode
                    .link_references
                    .values()
                    .flat_map(|libs| libs.values())
                    .map(Vec::len)
                    .sum();
                (name.to_string(), refs)
            })
            .collect())
    }
}

struct Refuses;

impl Validator for Refuses {
    type Report = ();
    type Error = fmt::Error;

    fn validate(
        &self,
        _output: &CompilerOutput,
        _decoder: &SourceDecoder,
    ) -> Result<BTreeMap<String, ()>, fmt::Error> {
        Err(fmt::Error)
    }
}

#[test]
fn validator_sees_every_contract() {
    let project = Project::new();
    let p = placeholder("Lib");
    project.write(
        &ArtifactBuilder::new("Token", &project.source_path("Token.sol"), 0)
            .bytecode(&format!("00{p}00{p}")),
    );
    project.write(&ArtifactBuilder::new("Lib", &project.source_path("Lib.sol"), 1));

    let counts =
        validate_artifacts(&project.artifacts_dir(), &project.sources_dir(), &LinkCount).unwrap();
    assert_eq!(counts["Token"], 2);
    assert_eq!(counts["Lib"], 0);
}

#[test]
fn decoder_reports_paths_relative_to_sources() {
    let project = Project::new();
    let a = project.source_path("A.sol");
    project.write(&ArtifactBuilder::new("A", &a, 0));
    project.write(&ArtifactBuilder::new("B", &project.source_path("nested/B.sol"), 1).import(&a, 0));

    let sites = project.pipeline().validate(&DeclarationSites).unwrap();
    assert_eq!(sites["A"], "A.sol:2");
    assert_eq!(sites["B"], format!("{}:2", PathBuf::from("nested").join("B.sol").display()));
}

#[test]
fn decoder_resolves_lines_and_columns() {
    let project = Project::new();
    let path = project.source_path("Multi.sol");
    let text = "pragma solidity ^0.6.0;\n\nimport \"./A.sol\";\n\ncontract Multi {}\n";
    project.write(&ArtifactBuilder::new("Multi", &path, 0).source(text));

    let pipeline = project.pipeline();
    let io = pipeline.reconstruct().unwrap();
    let decoder = pipeline.decoder(&io);

    let start = text.find("contract").unwrap();
    let loc = decoder.decode_src(&format!("{start}:17:0")).unwrap();
    assert_eq!(loc.path, PathBuf::from("Multi.sol"));
    assert_eq!((loc.line, loc.col), (5, 1));
    assert!(decoder.decode_src("0:1:9").is_none());
    assert!(decoder.decode_src("garbage").is_none());
}

#[test]
fn validator_failure_is_wrapped() {
    let project = Project::new();
    project.write(&ArtifactBuilder::new("A", &project.source_path("A.sol"), 0));

    let err = project.pipeline().validate(&Refuses).unwrap_err();
    assert!(matches!(err, PipelineError::Validator(_)));
    assert!(err.to_string().starts_with("validation failed"));
}

#[test]
fn inconsistent_artifacts_never_reach_the_validator() {
    let project = Project::new();
    let a = project.source_path("A.sol");
    project.write(&ArtifactBuilder::new("A", &a, 0));
    project.write(&ArtifactBuilder::new("B", &project.source_path("B.sol"), 1).import(&a, 7));

    // `Refuses` would fail with a validator error if it were reached.
    let err = project.pipeline().validate(&Refuses).unwrap_err();
    assert!(matches!(err, PipelineError::Reconstruct(_)));
}
