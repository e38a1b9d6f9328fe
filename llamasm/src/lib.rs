pub mod directive;
pub mod error;
pub mod labels;
pub mod line;
pub mod optable;
pub mod pass_one;
pub mod symfile;

pub use error::{Diagnostic, ErrorKind, PassError};
pub use labels::{DuplicateSymbol, SymbolEntry, SymbolTable};
pub use line::{classify, tokenize, LineKind, LineTokens, Operand};
pub use optable::{Llama16, OpTable};
pub use pass_one::{FirstPass, PassOptions, PassOutput};

/// Scan a LLAMA-16 program held in memory with the stock instruction
/// table and default options.
///
/// # Errors
///
/// If the accumulated diagnostics pass the default error limit.
pub fn scan_program(program: &str) -> Result<PassOutput, PassError> {
    FirstPass::parse_source(program, &Llama16, PassOptions::default())
}
