//! Option-line diagrams.
//!
//! An option line is a sequence of tokens, usually the arguments of a command
//! line, joined by single spaces. Annotations point at individual tokens and
//! are drawn beneath the joined line as caret-and-tilde underlines:
//!
//! ```text
//! zero one --two three
//!                ^~~~~ cannot find this file
//!          ^~~~~ for this option
//!      ^~~ for this sub-command
//! ```
//!
//! Annotations for later tokens are drawn first, so reading top to bottom
//! walks from the end of the line back towards its start. An annotation whose
//! index does not name a token points just past the end of the line.
//!
//! # Example
//!
//! ```
//! # use decor_core::options::{Annotation, render};
//! let lines = render(
//!     &["cp", "-r", "src"],
//!     &[Annotation::new(2, "no such directory")],
//! );
//!
//! assert_eq!(lines, vec!["cp -r src", "      ^~~ no such directory"]);
//! ```

mod annotation;
mod line;

pub use annotation::Annotation;
pub use line::{OptionLine, TokenSpan};

use log::trace;

/// Render `tokens` and their `annotations` into display lines.
///
/// Returns no lines at all when `tokens` is empty, whatever the annotations.
/// Otherwise the first line is the joined tokens, followed by one line per
/// annotation ordered by descending token index. Annotations sharing an index
/// keep the order in which they were given.
///
/// Columns and underline widths count `char`s, not bytes. For ASCII tokens
/// this is the classic byte layout. A token with multi-byte characters such
/// as `größe` gets an underline as wide as the token appears (`^~~~~`),
/// narrower than the one a byte-counting renderer would draw, and every later
/// column shifts left accordingly.
pub fn render<S: AsRef<str>>(tokens: &[S], annotations: &[Annotation]) -> Vec<String> {
    let Some(line) = OptionLine::new(tokens) else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(1 + annotations.len());
    lines.push(line.text().to_string());

    // `sort_by` is stable, which keeps insertion order among equal indices.
    let mut ordered: Vec<&Annotation> = annotations.iter().collect();
    ordered.sort_by(|a, b| b.index().cmp(&a.index()));

    trace!(tokens = tokens.len(), annotations = ordered.len(); "Rendering option line");

    lines.extend(ordered.into_iter().map(|annotation| line.underline(annotation)));
    lines
}
