//! Source decoder handed to validators.

use std::path::Path;

use recon_source::SourceMap;

use crate::types::{CompilerInput, CompilerOutput};

/// Resolves syntax-tree `src` descriptors to `path:line` positions.
pub type SourceDecoder = SourceMap;

/// Builds a decoder over the reconstructed sources.
///
/// Each output source is registered under its unit id with the matching
/// input text. Paths are reported relative to `sources_dir`.
pub fn source_decoder(
    input: &CompilerInput,
    output: &CompilerOutput,
    sources_dir: &Path,
) -> SourceDecoder {
    let mut map = SourceMap::new(sources_dir);
    for (path, source) in &output.sources {
        match input.sources.get(path) {
            Some(text) => map.add_unit(source.id, path, text.content.clone()),
            None => tracing::debug!(path = %path, "no input text for output source"),
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InputSource, OutputSource};
    use recon_artifact::SyntaxTree;
    use serde_json::json;
    use std::path::PathBuf;

    fn add(
        input: &mut CompilerInput,
        output: &mut CompilerOutput,
        path: &str,
        unit: u32,
        text: &str,
    ) {
        input.sources.insert(
            path.to_string(),
            InputSource {
                content: text.to_string(),
            },
        );
        let ast = SyntaxTree::try_from(json!({
            "nodeType": "SourceUnit",
            "src": format!("0:{}:{unit}", text.len())
        }))
        .unwrap();
        output.sources.insert(
            path.to_string(),
            OutputSource {
                id: ast.unit(),
                ast,
            },
        );
    }

    #[test]
    fn decodes_by_unit_id() {
        let mut input = CompilerInput::default();
        let mut output = CompilerOutput::default();
        add(
            &mut input,
            &mut output,
            "/proj/contracts/A.sol",
            0,
            "pragma solidity ^0.6.0;\ncontract A {}\n",
        );
        add(&mut input, &mut output, "/proj/contracts/B.sol", 1, "contract B {}\n");

        let decoder = source_decoder(&input, &output, Path::new("/proj"));
        assert_eq!(decoder.len(), 2);

        let a = decoder.decode_src("24:13:0").unwrap();
        assert_eq!(a.path, PathBuf::from("contracts/A.sol"));
        assert_eq!(a.line, 2);
        assert_eq!(
            decoder.decode_src("0:13:1").unwrap().to_string(),
            "contracts/B.sol:1"
        );
    }

    #[test]
    fn output_without_input_is_skipped() {
        let mut input = CompilerInput::default();
        let mut output = CompilerOutput::default();
        add(&mut input, &mut output, "A.sol", 0, "contract A {}");
        input.sources.clear();

        let decoder = source_decoder(&input, &output, Path::new("."));
        assert!(decoder.is_empty());
    }
}
