//! `recon check`: reconstruct, verify consistency and summarize contracts.
//!
//! Runs the full pipeline with a summarizing validator:
//!
//! 1. Resolve settings from `recon.toml` and flags
//! 2. Load every artifact
//! 3. Reconstruct the compiler input/output pair
//! 4. Check that imports agree on unit ids
//! 5. Summarize each contract (declaration site, library references)

use std::collections::BTreeMap;
use std::convert::Infallible;

use recon_solc::ast::{find_typed, ContractDefinition};
use recon_solc::{CompilerOutput, SourceDecoder, Validator};
use serde::Serialize;

use crate::settings::settings_for;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// What `recon check` reports for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractSummary {
    /// Source file the contract was compiled from.
    pub source_path: String,
    /// Compilation unit id of that file.
    pub unit: u32,
    /// `contract`, `library` or `interface`, when the tree says.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Declaration site as `path:line`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_at: Option<String>,
    /// Library name → byte offsets of its placeholders.
    pub libraries: BTreeMap<String, Vec<usize>>,
}

/// Validator producing a [`ContractSummary`] per contract.
pub struct SummaryValidator;

impl Validator for SummaryValidator {
    type Report = ContractSummary;
    type Error = Infallible;

    fn validate(
        &self,
        output: &CompilerOutput,
        decoder: &SourceDecoder,
    ) -> Result<BTreeMap<String, ContractSummary>, Infallible> {
        let mut reports = BTreeMap::new();
        for (path, name, contract) in output.iter_contracts() {
            let source = output.sources.get(path);
            let definition = source.and_then(|s| {
                find_typed::<ContractDefinition>(s.ast.root()).find(|d| d.name == name)
            });

            let libraries = contract
                .evm
                .bytecode
                .link_references
                .values()
                .flatten()
                .map(|(lib, refs)| (lib.clone(), refs.iter().map(|r| r.start).collect()))
                .collect();

            reports.insert(
                name.to_string(),
                ContractSummary {
                    source_path: path.to_string(),
                    unit: source.map(|s| s.id.as_raw()).unwrap_or_default(),
                    kind: definition.as_ref().and_then(|d| d.contract_kind.clone()),
                    declared_at: definition
                        .as_ref()
                        .and_then(|d| decoder.decode_src(&d.src))
                        .map(|loc| loc.to_string()),
                    libraries,
                },
            );
        }
        Ok(reports)
    }
}

/// Runs the `recon check` command.
///
/// Returns exit code 0 when every artifact belongs to one compilation run.
/// Reconstruction and consistency failures surface as errors.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = settings_for(global, &args.input)?;
    let pipeline = settings.pipeline();

    if !global.quiet {
        eprintln!("   Checking {}", settings.artifacts_dir.display());
    }

    let reports = pipeline.validate(&SummaryValidator)?;

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                print!("{}", render_text(&reports));
                eprintln!("   Result: {} contract(s), consistent", reports.len());
            }
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    Ok(0)
}

/// Renders summaries as one line per contract plus one per library.
pub fn render_text(reports: &BTreeMap<String, ContractSummary>) -> String {
    let mut out = String::new();
    for (name, summary) in reports {
        let kind = summary.kind.as_deref().unwrap_or("contract");
        let at = summary
            .declared_at
            .as_deref()
            .unwrap_or(summary.source_path.as_str());
        out.push_str(&format!("{kind} {name} ({at}, unit {})\n", summary.unit));
        for (lib, starts) in &summary.libraries {
            let starts: Vec<_> = starts.iter().map(|s| s.to_string()).collect();
            out.push_str(&format!("    links {lib} at {}\n", starts.join(", ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputArgs;
    use recon_solc::Pipeline;
    use std::path::Path;

    fn write_artifact(dir: &Path, name: &str, unit: u32, bytecode: &str) {
        let source = format!("pragma solidity ^0.6.0;\\ncontract {name} {{}}\\n");
        let json = format!(
            r#"{{"contractName": "{name}", "sourcePath": "{name}.sol",
                "source": "{source}", "bytecode": "{bytecode}",
                "ast": {{"nodeType": "SourceUnit", "src": "0:40:{unit}", "nodes": [
                    {{"nodeType": "ContractDefinition", "name": "{name}",
                      "contractKind": "contract", "src": "24:14:{unit}"}}
                ]}}}}"#
        );
        std::fs::write(dir.join(format!("{name}.json")), json).unwrap();
    }

    #[test]
    fn summaries_include_declaration_and_libraries() {
        let dir = tempfile::tempdir().unwrap();
        let lib = format!("__SafeMath{}", "_".repeat(30));
        write_artifact(dir.path(), "Token", 0, &format!("6080{lib}00{lib}"));
        write_artifact(dir.path(), "Plain", 1, "60806040");

        let reports = Pipeline::new(dir.path(), dir.path())
            .validate(&SummaryValidator)
            .unwrap();

        let token = &reports["Token"];
        assert_eq!(token.source_path, "Token.sol");
        assert_eq!(token.unit, 0);
        assert_eq!(token.kind.as_deref(), Some("contract"));
        assert_eq!(token.declared_at.as_deref(), Some("Token.sol:2"));
        assert_eq!(token.libraries["SafeMath"], vec![2, 23]);

        assert!(reports["Plain"].libraries.is_empty());
    }

    #[test]
    fn text_rendering_lists_links() {
        let mut reports = BTreeMap::new();
        reports.insert(
            "Token".to_string(),
            ContractSummary {
                source_path: "Token.sol".to_string(),
                unit: 3,
                kind: None,
                declared_at: None,
                libraries: BTreeMap::from([("Math".to_string(), vec![2, 40])]),
            },
        );
        assert_eq!(
            render_text(&reports),
            "contract Token (Token.sol, unit 3)\n    links Math at 2, 40\n"
        );
    }

    #[test]
    fn json_omits_missing_fields() {
        let summary = ContractSummary {
            source_path: "A.sol".to_string(),
            unit: 0,
            kind: None,
            declared_at: None,
            libraries: BTreeMap::new(),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"source_path": "A.sol", "unit": 0, "libraries": {}})
        );
    }

    #[test]
    fn run_succeeds_on_consistent_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "A", 0, "00");
        let args = CheckArgs {
            input: InputArgs {
                artifacts: Some(dir.path().to_path_buf()),
                sources: Some(dir.path().to_path_buf()),
                jobs: Some(1),
                strict_sources: false,
            },
            format: ReportFormat::Json,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.path().to_path_buf().join("missing.toml")),
        };
        // An explicit config path that does not exist is an error.
        assert!(run(&args, &global).is_err());

        let global = GlobalArgs {
            config: None,
            ..global
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }
}
