//! Token layout for option lines.
//!
//! Columns are counted in characters so that underlines stay aligned with
//! non-ASCII tokens in a terminal. Byte offsets are kept alongside for
//! consumers that address the joined text as a source buffer.

use crate::options::Annotation;

/// Layout of a single token within an [`OptionLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    column: usize,
    width: usize,
    offset: usize,
    len: usize,
}

impl TokenSpan {
    /// Get the column at which the token starts.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Get the number of columns from the token's start to the next token's
    /// start, including the separating space.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the byte offset of the token within the joined text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the byte length of the token.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the token is the empty string.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A non-empty sequence of tokens joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLine {
    text: String,
    spans: Vec<TokenSpan>,
    end_column: usize,
}

impl OptionLine {
    /// Lay out `tokens` on one line.
    ///
    /// Returns `None` when there are no tokens.
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }

        let mut text = String::new();
        let mut spans = Vec::with_capacity(tokens.len());
        let mut column = 0;

        for (i, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            if i > 0 {
                text.push(' ');
            }

            let width = token.chars().count() + 1;
            spans.push(TokenSpan {
                column,
                width,
                offset: text.len(),
                len: token.len(),
            });
            text.push_str(token);
            column += width;
        }

        Some(Self {
            text,
            spans,
            end_column: column,
        })
    }

    /// Get the joined text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the layout of every token, in order.
    pub fn spans(&self) -> &[TokenSpan] {
        &self.spans
    }

    /// Get the layout of the token at `index`, if there is one.
    pub fn span(&self, index: isize) -> Option<&TokenSpan> {
        usize::try_from(index).ok().and_then(|i| self.spans.get(i))
    }

    /// Get the column just past the last token's trailing separator.
    ///
    /// This is where a further token would start, and where annotations with
    /// an out-of-range index place their caret.
    pub fn end_column(&self) -> usize {
        self.end_column
    }

    /// Draw the underline for a single annotation.
    pub fn underline(&self, annotation: &Annotation) -> String {
        match self.span(annotation.index()) {
            Some(span) => format!(
                "{}^{} {}",
                " ".repeat(span.column),
                "~".repeat(span.width.saturating_sub(2)),
                annotation.comment()
            ),
            None => format!("{}^ {}", " ".repeat(self.end_column), annotation.comment()),
        }
    }
}
