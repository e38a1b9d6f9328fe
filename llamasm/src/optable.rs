use std::str::FromStr;

use libllama::{Mnemonic, Register};

use crate::error::ErrorKind;
use crate::line::Operand;

/// Instruction-size oracle the driver consults for everything that isn't
/// an assembler directive. Encoding itself is a second-pass concern; the
/// first pass only needs sizes to advance the location counter.
pub trait OpTable {
    /// Encoded size in bytes. Rejects unrecognized mnemonics and operand
    /// counts the mnemonic can't take.
    fn instruction_size(&self, mnemonic: &str, operands: &[Operand]) -> Result<usize, ErrorKind>;

    /// Whether `name` names a machine register. Used to tell registers
    /// apart from label references in operand position.
    fn is_register(&self, _name: &str) -> bool {
        false
    }
}

/// The LLAMA-16 instruction table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Llama16;

impl OpTable for Llama16 {
    fn instruction_size(&self, mnemonic: &str, operands: &[Operand]) -> Result<usize, ErrorKind> {
        let op = Mnemonic::from_str(mnemonic).map_err(|_| {
            ErrorKind::MalformedLine(format!("unrecognized mnemonic {:?}", mnemonic))
        })?;
        if operands.len() != op.operand_count() {
            return Err(ErrorKind::MalformedLine(format!(
                "invalid operands for mnemonic {:?}",
                mnemonic
            )));
        }

        let wide = operands.iter().any(|operand| match operand {
            Operand::Immediate(_) | Operand::MemRef(_) | Operand::StringLit(_) => true,
            Operand::Word(word) => Register::from_str(word).is_err(),
        });

        Ok(op.size(wide))
    }

    fn is_register(&self, name: &str) -> bool {
        Register::from_str(name).is_ok()
    }
}
