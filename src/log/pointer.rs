use super::{RESET, YELLOW};
use crate::region::Region;
use std::{
    cmp::max,
    fmt::{Formatter, Result},
};

const BLANK: &str = "";
const PIPE: &str = "|";
const EQUAL: &str = "=";
const HIGHLIGHT: &str = "^";

/// Points to a specific location within source text.
#[derive(Debug, PartialEq)]
pub struct Pointer {
    /// The line that the Pointer is pointing to.
    ///
    /// This number should be zero indexed.
    line: usize,
    /// The column that the Pointer is pointing to.
    ///
    /// This number should be zero indexed.
    column: usize,
    /// The length of the object being highlighted.
    length: usize,
    /// The actual line of text that is being pointed to.
    text: String,
}

impl Pointer {
    /// Create a new Pointer over the given source text and Region.
    pub fn new(source: &str, region: Region) -> Self {
        let lines: Vec<_> = source.split_terminator('\n').collect();
        let (line, column) = get_line_and_column(&lines, region.begin);
        let length = max(1, get_width(&source[region]));
        let text = lines.get(line).copied().unwrap_or_default().to_string();

        Self {
            line,
            column,
            length,
            text,
        }
    }

    /// Display the visualization by writing to the given Formatter.
    pub(crate) fn display(
        &self,
        formatter: &mut Formatter<'_>,
        template: Option<&str>,
        help: Option<&str>,
    ) -> Result {
        let num = (self.line + 1).to_string();
        let col = self.column + 1;
        let pad = get_width(&num);
        let align = self.column + self.length;

        let extra = "-".repeat(3_usize.saturating_sub(self.length));
        let name = template.unwrap_or("?");
        let text = &self.text;
        let underline = HIGHLIGHT.repeat(self.length);

        write!(
            formatter,
            "\n {BLANK:pad$}--> {name}:{num}:{col}\
             \n {BLANK:pad$} {PIPE}\
             \n {num:>} {PIPE} {text}\
             \n {BLANK:pad$} {PIPE} {YELLOW}{underline:>align$}{RESET}{extra}\
             \n {BLANK:pad$} {PIPE}\n",
        )?;

        if let Some(help) = help {
            write!(formatter, "{BLANK:pad$} {EQUAL} help: {help}\n")?;
        }

        Ok(())
    }
}

/// Get the line and column offset of the given byte offset.
///
/// The column is measured in display width, so it remains aligned with the
/// underline when the line contains wide characters.
fn get_line_and_column(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;

    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, get_width(&line[..offset - n]));
        }
        n += len;
    }

    let last = lines.len().saturating_sub(1);
    let width = lines.last().map(|line| get_width(line)).unwrap_or(0);

    (last, width)
}

/// Wrapper for UnicodeWidthStr::width.
fn get_width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(test)]
mod tests {
    use super::Pointer;

    #[test]
    fn test_second_line() {
        let source = "first line\n{{ name }}";
        let pointer = Pointer::new(source, (14..18).into());

        assert_eq!(
            pointer,
            Pointer {
                line: 1,
                column: 3,
                length: 4,
                text: "{{ name }}".to_string(),
            }
        );
    }

    #[test]
    fn test_eof() {
        let source = "{{ name";
        let pointer = Pointer::new(source, (7..7).into());

        assert_eq!(
            pointer,
            Pointer {
                line: 0,
                column: 7,
                length: 1,
                text: "{{ name".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_source() {
        let pointer = Pointer::new("", (0..0).into());

        assert_eq!(
            pointer,
            Pointer {
                line: 0,
                column: 0,
                length: 1,
                text: String::new(),
            }
        );
    }
}
