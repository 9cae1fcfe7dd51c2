use std::ops::Range;

const BOM: char = '\u{feff}';

/// A line of source with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line number, starts with 1.
    pub number: usize,
    /// Byte range of the line content in the source, line terminators excluded.
    pub range: Range<usize>,
    /// The line content, line terminators excluded.
    pub text: &'a str,
}

/// Walks the source line by line.
pub struct Cursor<'a> {
    /// The line number of the next line, starts with 1.
    line: usize,
    /// The index position.
    index: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let index = if source.starts_with(BOM) { BOM.len_utf8() } else { 0 };
        Self {
            line: 1,
            index,
            source,
        }
    }

    pub const fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }

    /// Determine the end of the current line and handle CRLF (\r\n) correctly.
    ///
    /// Returns a tuple `(remaining_end, line_end_index)` where:
    /// - `remaining_end` is the absolute byte index just past the line feed, or the source length.
    /// - `line_end_index` is the absolute byte index where the line content ends (exclusive),
    ///   with a trailing `\r` excluded.
    fn current_line_bounds(&self) -> (usize, usize) {
        let rest = &self.source[self.index..];
        let (content_len, remaining_end) = rest
            .find('\n')
            .map_or((rest.len(), self.source.len()), |lf| {
                (lf, self.index + lf + 1)
            });
        let content = &rest[..content_len];
        let line_end_index = self.index + content.strip_suffix('\r').unwrap_or(content).len();
        (remaining_end, line_end_index)
    }

    /// Move cursor, through and return the next line.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.is_end() {
            return None;
        }
        let (remaining_end, line_end_index) = self.current_line_bounds();
        let line = Line {
            number: self.line,
            range: self.index..line_end_index,
            text: &self.source[self.index..line_end_index],
        };
        self.line += 1;
        self.index = remaining_end;
        Some(line)
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_with_positions() {
        let mut cursor = Cursor::new("osu file format v14\r\n\r\n[General]\nMode: 0");
        assert_eq!(
            cursor.next_line(),
            Some(Line {
                number: 1,
                range: 0..19,
                text: "osu file format v14"
            })
        );
        assert_eq!(cursor.next_line().map(|l| l.text), Some(""));
        let general = cursor.next_line().unwrap();
        assert_eq!(general.number, 3);
        assert_eq!(general.text, "[General]");
        assert_eq!(general.range, 23..32);
        assert_eq!(cursor.next_line().map(|l| l.text), Some("Mode: 0"));
        assert_eq!(cursor.next_line(), None);
        assert!(cursor.is_end());
    }

    #[test]
    fn skips_bom() {
        let source = "\u{feff}osu file format v9\n";
        let lines: Vec<_> = Cursor::new(source).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "osu file format v9");
        assert_eq!(&source[lines[0].range.clone()], "osu file format v9");
    }

    #[test]
    fn trailing_newline_does_not_yield_empty_line() {
        assert_eq!(Cursor::new("a\nb\n").count(), 2);
        assert_eq!(Cursor::new("").count(), 0);
        assert_eq!(Cursor::new("\n").count(), 1);
    }
}
