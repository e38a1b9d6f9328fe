pub mod op;
pub mod reg;

pub use op::Mnemonic;
pub use reg::Register;

/// LLAMA-16 machine word, in bytes.
pub static WORD_SIZE: usize = 2;
