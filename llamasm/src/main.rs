use anyhow::Result;
use llamasm::{symfile, FirstPass, Llama16, PassOptions};
use std::env;
use std::fs::{self, File};

fn main() -> Result<()> {
    env_logger::init();

    let filename: String = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::Error::msg("Need an input filename"))?;
    let output_name: String = env::args()
        .nth(2)
        .ok_or_else(|| anyhow::Error::msg("Need an output filename"))?;

    let output = FirstPass::parse_file(&filename, &Llama16, PassOptions::default())?;

    for diagnostic in &output.diagnostics {
        eprintln!("{}", diagnostic);
    }

    let sym = File::create(format!("{}.sym", output_name))?;
    symfile::write_symbols(sym, &output.symbols)?;
    fs::write(format!("{}.sdb", output_name), output.to_json()?)?;

    if !output.diagnostics.is_empty() {
        return Err(anyhow::Error::msg(format!(
            "{} errors",
            output.diagnostics.len()
        )));
    }

    Ok(())
}
