use strum_macros::EnumString;

use crate::WORD_SIZE;

/// The LLAMA-16 instruction set. Mnemonics are matched without regard to
/// case, so `MV` and `mv` name the same instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Mnemonic {
    Mv,
    Lea,
    Push,
    Pop,
    Add,
    Sub,
    Inc,
    Dec,
    And,
    Or,
    Not,
    Cmp,
    Call,
    Jnz,
    Ret,
    Hlt,
}

impl Mnemonic {
    /// Operands the instruction takes. A count mismatch is a malformed
    /// line, not a different encoding.
    pub fn operand_count(&self) -> usize {
        use Mnemonic::*;

        match self {
            Ret | Hlt => 0,
            Push | Pop | Inc | Dec | Not | Call | Jnz => 1,
            Mv | Lea | Add | Sub | And | Or | Cmp => 2,
        }
    }

    /// Encoded size in bytes. `wide` is true when an operand needs an
    /// extension word (immediate, memory reference, or label).
    pub fn size(&self, wide: bool) -> usize {
        use Mnemonic::*;

        match self {
            Push | Pop | Inc | Dec | Not | Ret | Hlt => WORD_SIZE,
            // Always carry a target address word.
            Call | Jnz => 2 * WORD_SIZE,
            Mv | Lea | Add | Sub | And | Or | Cmp => {
                if wide {
                    2 * WORD_SIZE
                } else {
                    WORD_SIZE
                }
            }
        }
    }
}
