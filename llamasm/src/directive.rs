use std::str::FromStr;

use strum_macros::EnumString;

use libllama::WORD_SIZE;

use crate::error::ErrorKind;
use crate::line::Operand;

/// Assembler directives the first pass sizes itself, as opposed to machine
/// instructions, which go through the op table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Assembler {
    #[strum(serialize = ".data")]
    DATA,
    #[strum(serialize = ".string")]
    STRING,
}

impl Assembler {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::from_str(mnemonic).ok()
    }

    /// Bytes of storage the directive reserves.
    pub fn size(&self, operands: &[Operand]) -> Result<usize, ErrorKind> {
        match self {
            Assembler::DATA => {
                let stringy = operands
                    .iter()
                    .any(|operand| matches!(operand, Operand::StringLit(_)));
                if operands.is_empty() || stringy {
                    return Err(ErrorKind::MalformedLine(
                        ".data requires one or more word values".to_owned(),
                    ));
                }

                Ok(operands.len() * WORD_SIZE)
            }
            Assembler::STRING => match operands {
                [Operand::StringLit(text)] => Ok(text.chars().count() * WORD_SIZE),
                _ => Err(ErrorKind::MalformedLine(
                    ".string requires a single quoted string".to_owned(),
                )),
            },
        }
    }
}
