use std::io::{self, Write};

use crate::labels::SymbolTable;

/// Write the defined symbols as `ADDR NAME` lines, addresses in hex,
/// names upper-cased and cut to 16 characters, in definition order.
/// Referenced-but-undefined entries are left out; they have no address.
pub fn write_symbols<W: Write>(mut out: W, symbols: &SymbolTable) -> io::Result<()> {
    for entry in symbols.iter().filter(|entry| entry.defined) {
        let name: String = entry.name.chars().take(16).collect();
        writeln!(out, "{:04X} {}", entry.address, name.to_ascii_uppercase())?;
    }

    Ok(())
}
