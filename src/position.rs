use std::fmt;

/// A 1-based line, 0-based column position in the source text.
///
/// Columns are counted in UTF-16 code units from the start of the line,
/// matching the Babel-AST position convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start/end [`Position`] pair attached to every token and AST node.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    pub filename: Option<String>,
    /// For identifier-shaped nodes: the source name, kept alongside the
    /// position so downstream consumers don't need to re-slice the input.
    pub identifier_name: Option<String>,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            filename: None,
            identifier_name: None,
        }
    }
}

/// Tracks line-start byte offsets for an input so byte offsets can be
/// converted to [`Position`]s without rescanning from the beginning.
#[derive(Debug, Clone)]
pub struct LineTable {
    /// Byte offset of the first byte of each line; `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    start_line: usize,
}

impl LineTable {
    pub fn new(input: &str, start_line: usize) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in input.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            start_line,
        }
    }

    /// Resolve a byte offset into a 1-based line / 0-based column position.
    ///
    /// Binary-searches the precomputed line-start table — the lexer calls
    /// this on every token, so it must stay sub-linear in input length.
    pub fn position_for(&self, offset: usize) -> Position {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let column = offset - self.line_starts[line_index];
        Position::new(self.start_line + line_index, column)
    }
}
