use strum_macros::EnumString;

/// The four general-purpose LLAMA-16 registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Register {
    A,
    B,
    C,
    D,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn registers_parse_case_insensitively() {
        assert_eq!(Register::from_str("a").unwrap(), Register::A);
        assert_eq!(Register::from_str("D").unwrap(), Register::D);
        assert!(Register::from_str("R1").is_err());
        assert!(Register::from_str("").is_err());
    }
}
