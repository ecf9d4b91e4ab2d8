// src/search/text.rs

//! Conversion between text lines and the padded code-point matrix the
//! matcher searches.

use std::fmt;

/// Code used to pad short rows.
pub const FILLER: u32 = 0;

/// Encodes `text` as one Unicode scalar value per character.
pub fn encode_str(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Lines of a text as a row-major matrix of code points, every row padded
/// with [`FILLER`] to the width of the longest line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharMatrix {
    codes: Vec<u32>,
    width: usize,
    rows: usize,
}

impl CharMatrix {
    /// Builds the matrix from `lines`. Line terminators are not part of a line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let encoded: Vec<Vec<u32>> = lines
            .into_iter()
            .map(|line| encode_str(line.as_ref().trim_end_matches(['\n', '\r'])))
            .collect();
        let width = encoded.iter().map(Vec::len).max().unwrap_or(0);

        let mut codes = Vec::with_capacity(width * encoded.len());
        for row in &encoded {
            codes.extend_from_slice(row);
            codes.resize(codes.len() + width - row.len(), FILLER);
        }
        Self { codes, width, rows: encoded.len() }
    }

    /// Splits `text` into lines and builds the matrix.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Row width `W` (length of the longest line).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns `true` when the matrix holds no code at all.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Row `index` including padding.
    pub fn row(&self, index: usize) -> Option<&[u32]> {
        (index < self.rows).then(|| &self.codes[index * self.width..(index + 1) * self.width])
    }

    /// All codes in row-major order.
    pub fn flattened(&self) -> &[u32] {
        &self.codes
    }

    /// Largest code in the matrix.
    pub fn max_code(&self) -> Option<u32> {
        self.codes.iter().copied().max()
    }

    /// Row holding flattened position `index`.
    pub fn line_of(&self, index: usize) -> usize {
        index / self.width.max(1)
    }

    /// Decodes row `index` back to text, dropping trailing filler.
    pub fn row_text(&self, index: usize) -> Option<String> {
        let row = self.row(index)?;
        let end = row.iter().rposition(|&c| c != FILLER).map_or(0, |last| last + 1);
        Some(row[..end].iter().filter_map(|&c| char::from_u32(c)).collect())
    }
}

impl fmt::Display for CharMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CharMatrix[{} rows x {} columns]", self.rows, self.width)?;
        for r in 0..self.rows {
            if let Some(row) = self.row(r) {
                let codes: Vec<String> = row.iter().map(u32::to_string).collect();
                writeln!(f, "  {:>4}: [{}]", r, codes.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_padded_to_longest_line() {
        let matrix = CharMatrix::from_lines(["cat", "dog", "cats"]);
        assert_eq!(matrix.width(), 4);
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.row(0), Some(&[99, 97, 116, 0][..]));
        assert_eq!(matrix.row(2), Some(&[99, 97, 116, 115][..]));
        assert_eq!(matrix.row(3), None);
        assert_eq!(matrix.max_code(), Some(116));
    }

    #[test]
    fn test_line_terminators_are_stripped() {
        let matrix = CharMatrix::from_lines(["ab\n", "c\r\n"]);
        assert_eq!(matrix.width(), 2);
        assert_eq!(matrix.row_text(1).as_deref(), Some("c"));
    }

    #[test]
    fn test_line_of_uses_row_width() {
        let matrix = CharMatrix::from_text("ab\ncd\nef");
        assert_eq!(matrix.line_of(0), 0);
        assert_eq!(matrix.line_of(3), 1);
        assert_eq!(matrix.line_of(5), 2);
    }

    #[test]
    fn test_empty_text_gives_empty_matrix() {
        let matrix = CharMatrix::from_text("");
        assert!(matrix.is_empty());
        assert_eq!(matrix.max_code(), None);
    }

    #[test]
    fn test_encode_str_uses_code_points() {
        assert_eq!(encode_str("aé€"), vec![97, 233, 8364]);
    }
}
