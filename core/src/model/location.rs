use serde::{Deserialize, Serialize};

/// Identifier for a source file within a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u64);

/// Text range in (line, col) space; 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextRange {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl TextRange {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A range covering a single line from `start_col` to `end_col`.
    pub fn on_line(line: u32, start_col: u32, end_col: u32) -> Self {
        Self::new(line, start_col, line, end_col)
    }
}

/// Handle to "where in the source" a syntax node lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AstLocation {
    pub file_id: FileId,
    pub range: TextRange,
}

impl AstLocation {
    pub fn new(file_id: FileId, range: TextRange) -> Self {
        Self { file_id, range }
    }

    /// 1-based line of the start position, as editors display it.
    pub fn display_line(&self) -> u32 {
        self.range.start_line + 1
    }

    /// 1-based column of the start position.
    pub fn display_column(&self) -> u32 {
        self.range.start_col + 1
    }
}

/// A source file that belongs to a compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub file_id: FileId,
    pub path: String,

    /// Tool-generated files (designer output, scaffolding) are skipped by default.
    #[serde(default)]
    pub is_generated: bool,
}
