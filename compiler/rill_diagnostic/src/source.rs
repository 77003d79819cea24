//! Source file with on-demand position rendering.

/// A named source text.
///
/// Line and column numbers are derived from byte offsets on demand; nothing
/// is precomputed, since positions are only needed when an error is actually
/// reported.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based line number of a byte offset.
    pub fn line_number(&self, offset: u32) -> usize {
        let end = (offset as usize).min(self.text.len());
        1 + self.text[..end].bytes().filter(|&b| b == b'\n').count()
    }

    /// 1-based column number of a byte offset.
    pub fn column_number(&self, offset: u32) -> usize {
        let offset = (offset as usize).min(self.text.len());
        1 + offset - self.line_start(offset)
    }

    /// The full text of the line containing a byte offset, without the
    /// trailing newline.
    pub fn line(&self, offset: u32) -> &str {
        let offset = (offset as usize).min(self.text.len());
        &self.text[self.line_start(offset)..self.line_end(offset)]
    }

    fn line_start(&self, offset: usize) -> usize {
        self.text[..offset]
            .rfind('\n')
            .map(|p| p + 1)
            .unwrap_or(0)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.text[offset..]
            .find('\n')
            .map(|p| offset + p)
            .unwrap_or(self.text.len())
    }

    /// Render the location block for a byte offset:
    ///
    /// ```text
    /// in {name} on line {line} column {col}
    /// {source line}
    /// {col-1 spaces}*
    /// ```
    ///
    /// The exact format is part of the external contract; do not reword it.
    pub fn location_message(&self, offset: u32) -> String {
        let column = self.column_number(offset);
        format!(
            "in {} on line {} column {}\n{}\n{}*\n",
            self.name,
            self.line_number(offset),
            column,
            self.line(offset),
            " ".repeat(column - 1),
        )
    }
}
