//! `recon emit`: write the reconstructed compiler input and output.

use std::path::Path;

use recon_solc::ReconstructedIo;

use crate::settings::settings_for;
use crate::{EmitArgs, GlobalArgs};

/// File name of the emitted compiler input.
pub const INPUT_FILE: &str = "input.json";
/// File name of the emitted compiler output.
pub const OUTPUT_FILE: &str = "output.json";

/// Runs the `recon emit` command.
pub fn run(args: &EmitArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = settings_for(global, &args.input)?;
    let io = settings.pipeline().reconstruct()?;

    write_io(&io, &args.out)?;

    if !global.quiet {
        eprintln!(
            "    Wrote {} source(s), {} contract(s) to {}",
            io.input.sources.len(),
            io.output.contract_count(),
            args.out.display()
        );
    }
    Ok(0)
}

/// Writes `input.json` and `output.json` into `out`, creating it if needed.
pub fn write_io(io: &ReconstructedIo, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out)?;
    std::fs::write(out.join(INPUT_FILE), serde_json::to_string_pretty(&io.input)?)?;
    std::fs::write(out.join(OUTPUT_FILE), serde_json::to_string_pretty(&io.output)?)?;
    tracing::debug!(dir = %out.display(), "wrote compiler input/output");
    Ok(())
}
