use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_until1, take_while1},
    character::complete::{alpha1, alphanumeric0, space0, space1},
    combinator::{map, opt, recognize},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Skip,
    Meaningful,
}

/// Decide whether a raw line contributes meaning. Empty lines, lines of
/// only blanks and tabs, and lines whose first non-blank character is the
/// comment marker carry nothing for the pass.
pub fn classify(line: &str) -> LineKind {
    for c in line.chars() {
        match c {
            ' ' | '\t' => continue,
            ';' => return LineKind::Skip,
            _ => return LineKind::Meaningful,
        }
    }

    LineKind::Skip
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// `#`-prefixed immediate.
    Immediate(String),
    /// `[...]`-bracketed memory reference, brackets stripped.
    MemRef(String),
    /// Double-quoted string literal.
    StringLit(String),
    /// Bare word: register, label, or numeric literal.
    Word(String),
}

impl Operand {
    pub fn text(&self) -> &str {
        match self {
            Operand::Immediate(text)
            | Operand::MemRef(text)
            | Operand::StringLit(text)
            | Operand::Word(text) => text,
        }
    }
}

/// One meaningful line split into its fields. Consumed by the driver and
/// discarded; nothing here survives the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens {
    pub label: Option<String>,
    pub mnemonic: String,
    pub operands: Vec<Operand>,
}

fn ident(i: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, alphanumeric0))(i)
}

fn label_field(i: &str) -> IResult<&str, &str> {
    terminated(ident, tag(":"))(i)
}

fn mnemonic_word(i: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(tag(".")),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(i)
}

fn operand_word(i: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != ',' && c != ';')(i)
}

fn operand(i: &str) -> IResult<&str, Operand> {
    alt((
        map(preceded(tag("#"), operand_word), |w: &str| {
            Operand::Immediate(w.to_owned())
        }),
        map(delimited(tag("["), take_until1("]"), tag("]")), |w: &str| {
            Operand::MemRef(w.trim().to_owned())
        }),
        map(
            delimited(tag("\""), take_until("\""), tag("\"")),
            |w: &str| Operand::StringLit(w.to_owned()),
        ),
        map(operand_word, |w: &str| Operand::Word(w.to_owned())),
    ))(i)
}

fn operand_sep(i: &str) -> IResult<&str, &str> {
    alt((recognize(tuple((space0, tag(","), space0))), space1))(i)
}

fn operand_list(i: &str) -> IResult<&str, Vec<Operand>> {
    separated_list1(operand_sep, operand)(i)
}

/// Split a meaningful line into label, mnemonic, and operands.
///
/// A label is an identifier starting in column one and terminated by `:`.
/// Operands are separated by commas or whitespace; a trailing `;` comment
/// is dropped. Over-length lines are reported rather than truncated.
pub fn tokenize(line: &str, max_line_length: usize) -> Result<LineTokens, ErrorKind> {
    if line.len() > max_line_length {
        return Err(ErrorKind::LineTooLong {
            length: line.len(),
            limit: max_line_length,
        });
    }

    let (rest, label) = match label_field(line) {
        Ok((rest, label)) => (rest, Some(label.to_owned())),
        Err(_) => (line, None),
    };

    let (rest, mnemonic) = preceded(space0, mnemonic_word)(rest)
        .map_err(|_| ErrorKind::MalformedLine("no mnemonic".to_owned()))?;

    let (rest, operands) = match preceded(space1, operand_list)(rest) {
        Ok((rest, operands)) => (rest, operands),
        Err(_) => (rest, Vec::new()),
    };

    let rest = rest.trim_start_matches(|c| c == ' ' || c == '\t');
    if !rest.is_empty() && !rest.starts_with(';') {
        return Err(ErrorKind::MalformedLine(format!("unexpected {:?}", rest)));
    }

    Ok(LineTokens {
        label,
        mnemonic: mnemonic.to_owned(),
        operands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_skips_blank_and_comment_lines() {
        assert_eq!(classify(""), LineKind::Skip);
        assert_eq!(classify("   \t  "), LineKind::Skip);
        assert_eq!(classify("; top comment"), LineKind::Skip);
        assert_eq!(classify("  \t ; indented comment"), LineKind::Skip);
    }

    #[test]
    fn classifier_keeps_content_lines() {
        assert_eq!(classify("start: mv a, #0"), LineKind::Meaningful);
        assert_eq!(classify("   hlt"), LineKind::Meaningful);
        assert_eq!(classify("x"), LineKind::Meaningful);
        // Control bytes are content, not whitespace.
        assert_eq!(classify("\u{1}"), LineKind::Meaningful);
    }

    fn tokens(line: &str) -> LineTokens {
        tokenize(line, 256).unwrap()
    }

    #[test]
    fn label_and_mnemonic_round_trip() {
        let tokens = tokens("L: ADD");

        assert_eq!(tokens.label.as_deref(), Some("L"));
        assert_eq!(tokens.mnemonic, "ADD");
        assert!(tokens.operands.is_empty());
    }

    #[test]
    fn operands_split_on_commas_and_whitespace() {
        let with_commas = tokens("mv a, #5");
        let with_spaces = tokens("mv a #5");

        assert_eq!(with_commas.operands, with_spaces.operands);
        assert_eq!(
            with_commas.operands,
            vec![
                Operand::Word("a".to_owned()),
                Operand::Immediate("5".to_owned()),
            ]
        );
    }

    #[test]
    fn operand_syntax_classes() {
        let tokens = tokens("lea b, [ vector ]");

        assert_eq!(
            tokens.operands,
            vec![
                Operand::Word("b".to_owned()),
                Operand::MemRef("vector".to_owned()),
            ]
        );

        let tokens = super::tokenize(".string \"hi there\"", 256).unwrap();
        assert_eq!(
            tokens.operands,
            vec![Operand::StringLit("hi there".to_owned())]
        );
    }

    #[test]
    fn trailing_comment_is_dropped() {
        let tokens = tokens("inc a ; bump the counter");

        assert_eq!(tokens.mnemonic, "inc");
        assert_eq!(tokens.operands, vec![Operand::Word("a".to_owned())]);
    }

    #[test]
    fn label_without_mnemonic_is_malformed() {
        let err = tokenize("lonely:", 256).unwrap_err();
        assert!(matches!(err, ErrorKind::MalformedLine(_)));
    }

    #[test]
    fn indented_label_is_malformed() {
        let err = tokenize("  foo: hlt", 256).unwrap_err();
        assert!(matches!(err, ErrorKind::MalformedLine(_)));
    }

    #[test]
    fn over_length_line_is_reported() {
        let long = "y".repeat(300);

        let err = tokenize(&long, 256).unwrap_err();

        assert_eq!(
            err,
            ErrorKind::LineTooLong {
                length: 300,
                limit: 256,
            }
        );
    }
}
