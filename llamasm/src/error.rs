use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::labels::DuplicateSymbol;

/// A per-line problem. The pass records one of these against the line
/// number and keeps scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ErrorKind {
    #[error("line is {length} characters, limit is {limit}")]
    LineTooLong { length: usize, limit: usize },
    #[error("malformed line: {0}")]
    MalformedLine(String),
    #[error(transparent)]
    DuplicateSymbol(#[from] DuplicateSymbol),
}

/// An error bound to the source line that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line_no: usize,
    pub kind: ErrorKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_no, self.kind)
    }
}

/// Conditions that end the pass instead of being accumulated.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("cannot read {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("aborted after {} errors", .diagnostics.len())]
    TooManyErrors { diagnostics: Vec<Diagnostic> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_name_their_line() {
        let diagnostic = Diagnostic {
            line_no: 12,
            kind: ErrorKind::LineTooLong {
                length: 300,
                limit: 256,
            },
        };

        assert_eq!(
            diagnostic.to_string(),
            "line 12: line is 300 characters, limit is 256"
        );
    }
}
