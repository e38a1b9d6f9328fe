use std::fs::File;
use std::io::{BufRead, BufReader};
use std::mem;
use std::path::Path;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::directive::Assembler;
use crate::error::{Diagnostic, ErrorKind, PassError};
use crate::labels::SymbolTable;
use crate::line::{classify, tokenize, LineKind, LineTokens, Operand};
use crate::optable::OpTable;

/// Default cap on a single source line, in bytes.
pub const MAX_LINE_LENGTH: usize = 256;
/// Default number of diagnostics tolerated before the pass gives up.
pub const ERROR_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct PassOptions {
    pub max_line_length: usize,
    pub error_limit: usize,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            max_line_length: MAX_LINE_LENGTH,
            error_limit: ERROR_LIMIT,
        }
    }
}

/// Everything the first pass hands to the second: the frozen symbol
/// table, the diagnostics in source order, and where the location counter
/// ended up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassOutput {
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
    pub location_counter: usize,
}

impl PassOutput {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub struct FirstPass<'a, T: OpTable + ?Sized> {
    table: &'a T,
    options: PassOptions,
    location: usize,
    symbols: SymbolTable,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, T: OpTable + ?Sized> FirstPass<'a, T> {
    fn new(table: &'a T, options: PassOptions) -> Self {
        Self {
            table,
            options,
            location: 0,
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run the pass over a source file.
    ///
    /// # Errors
    ///
    /// `SourceUnreadable` if the file can't be opened or read,
    /// `TooManyErrors` if the diagnostic count passes the configured
    /// limit.
    pub fn parse_file<P: AsRef<Path>>(
        path: P,
        table: &'a T,
        options: PassOptions,
    ) -> Result<PassOutput, PassError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PassError::SourceUnreadable {
            path: path.to_owned(),
            source,
        })?;
        debug!("first pass over {}", path.display());

        let mut pass = Self::new(table, options);
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| PassError::SourceUnreadable {
                path: path.to_owned(),
                source,
            })?;
            pass.scan_line(number + 1, &line)?;
        }

        Ok(pass.finish())
    }

    /// Run the pass over source text already in memory.
    ///
    /// # Errors
    ///
    /// `TooManyErrors` if the diagnostic count passes the configured
    /// limit.
    pub fn parse_source(
        source: &str,
        table: &'a T,
        options: PassOptions,
    ) -> Result<PassOutput, PassError> {
        let mut pass = Self::new(table, options);
        for (number, line) in source.lines().enumerate() {
            pass.scan_line(number + 1, line)?;
        }

        Ok(pass.finish())
    }

    fn scan_line(&mut self, line_no: usize, raw: &str) -> Result<(), PassError> {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if classify(line) == LineKind::Skip {
            return Ok(());
        }

        let tokens = match tokenize(line, self.options.max_line_length) {
            Ok(tokens) => tokens,
            Err(kind) => return self.report(line_no, kind),
        };

        if let Some(ref label) = tokens.label {
            match self.symbols.define(label, self.location, line_no) {
                Ok(()) => trace!("defined {} at {:#06x}", label, self.location),
                Err(duplicate) => self.report(line_no, duplicate.into())?,
            }
        }

        let size = match self.line_size(&tokens) {
            Ok(size) => size,
            Err(kind) => return self.report(line_no, kind),
        };

        self.note_references(&tokens, line_no);
        self.location += size;

        Ok(())
    }

    fn line_size(&self, tokens: &LineTokens) -> Result<usize, ErrorKind> {
        if tokens.mnemonic.starts_with('.') {
            let directive = Assembler::from_mnemonic(&tokens.mnemonic).ok_or_else(|| {
                ErrorKind::MalformedLine(format!("unknown directive {:?}", tokens.mnemonic))
            })?;
            return directive.size(&tokens.operands);
        }

        self.table
            .instruction_size(&tokens.mnemonic, &tokens.operands)
    }

    fn note_references(&mut self, tokens: &LineTokens, line_no: usize) {
        for operand in &tokens.operands {
            if matches!(operand, Operand::StringLit(_)) {
                continue;
            }
            let name = operand.text();
            if name.is_empty() || is_numeric(name) || self.table.is_register(name) {
                continue;
            }
            self.symbols.reference(name, line_no);
        }
    }

    fn report(&mut self, line_no: usize, kind: ErrorKind) -> Result<(), PassError> {
        warn!("line {}: {}", line_no, kind);
        self.diagnostics.push(Diagnostic { line_no, kind });

        if self.diagnostics.len() > self.options.error_limit {
            return Err(PassError::TooManyErrors {
                diagnostics: mem::take(&mut self.diagnostics),
            });
        }

        Ok(())
    }

    fn finish(self) -> PassOutput {
        debug!(
            "pass one complete: {} symbols, {} diagnostics, {} bytes",
            self.symbols.len(),
            self.diagnostics.len(),
            self.location
        );

        PassOutput {
            symbols: self.symbols,
            diagnostics: self.diagnostics,
            location_counter: self.location,
        }
    }
}

fn is_numeric(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSize(usize);

    impl OpTable for FixedSize {
        fn instruction_size(
            &self,
            _mnemonic: &str,
            _operands: &[Operand],
        ) -> Result<usize, ErrorKind> {
            Ok(self.0)
        }
    }

    fn scan(program: &str) -> PassOutput {
        FirstPass::parse_source(program, &FixedSize(3), PassOptions::default()).unwrap()
    }

    #[test]
    fn comments_and_blanks_contribute_nothing() {
        let output = scan("; comment\n\nSTART: ADD R1,R2\n");

        assert!(output.diagnostics.is_empty());
        assert_eq!(output.symbols.lookup("START"), Some(0));
        assert_eq!(output.symbols.iter().filter(|e| e.defined).count(), 1);
        assert_eq!(output.location_counter, 3);
    }

    #[test]
    fn location_counter_sums_instruction_sizes() {
        let output = FirstPass::parse_source(
            "a1: op\n    op\n    op\n",
            &FixedSize(2),
            PassOptions::default(),
        )
        .unwrap();

        assert_eq!(output.location_counter, 6);
        assert_eq!(output.symbols.lookup("a1"), Some(0));
    }

    #[test]
    fn long_line_is_reported_and_scanning_continues() {
        let long = "x".repeat(300);
        let program = format!("{}\nok: op\n", long);

        let output = scan(&program);

        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].line_no, 1);
        assert_eq!(
            output.diagnostics[0].kind,
            ErrorKind::LineTooLong {
                length: 300,
                limit: 256,
            }
        );
        assert_eq!(output.symbols.lookup("ok"), Some(0));
    }

    #[test]
    fn duplicate_symbol_keeps_the_first_definition() {
        let output = scan("FOO: op\nFOO: op\n");

        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].line_no, 2);
        assert!(matches!(
            output.diagnostics[0].kind,
            ErrorKind::DuplicateSymbol(_)
        ));
        assert_eq!(output.symbols.lookup("FOO"), Some(0));
        // The second line still holds an instruction.
        assert_eq!(output.location_counter, 6);
    }

    #[test]
    fn label_without_mnemonic_is_not_defined() {
        let output = scan("lonely:\n");

        assert_eq!(output.diagnostics.len(), 1);
        assert!(matches!(
            output.diagnostics[0].kind,
            ErrorKind::MalformedLine(_)
        ));
        assert_eq!(output.symbols.lookup("lonely"), None);
    }

    #[test]
    fn too_many_errors_aborts_the_pass() {
        let options = PassOptions {
            error_limit: 2,
            ..Default::default()
        };

        let err = FirstPass::parse_source("???\n???\n???\nok: op\n", &FixedSize(3), options)
            .unwrap_err();

        match err {
            PassError::TooManyErrors { diagnostics } => assert_eq!(diagnostics.len(), 3),
            other => panic!("expected TooManyErrors, got {:?}", other),
        }
    }

    #[test]
    fn crlf_input_scans_cleanly() {
        let output = scan("START: op\r\n\r\n");

        assert!(output.diagnostics.is_empty());
        assert_eq!(output.symbols.lookup("START"), Some(0));
    }
}
