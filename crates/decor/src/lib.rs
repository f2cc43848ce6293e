//! Decor - errors decorated for command-line reporting.
//!
//! A [`DecoratedError`] wraps an optional cause and adds an exit code, a
//! temporary flag, and display lines, including an annotated rendering of
//! the command line that caused the failure. Exit code and temporariness
//! are resolved along the wrap chain, so they can be set where the failure
//! is best understood and read wherever the error ends up.
//!
//! # Example
//!
//! ```
//! use decor::DecoratedError;
//!
//! let err = DecoratedError::new("This is the error message.")
//!     .with_line_before_message("Optional lines before the error message.")
//!     .with_line_between_message_and_options("Some lines between message and options.")
//!     .with_options(["zero", "one", "--two", "three"])
//!     .with_option_comment(1, "for this sub-command")
//!     .with_option_comment(2, "for this option")
//!     .with_option_comment(3, "cannot find this file")
//!     .with_line_after_options("Zero or more additional")
//!     .with_line_after_options("lines of information.")
//!     .with_exit_code(13);
//!
//! let expected = "\
//! Optional lines before the error message.
//! This is the error message.
//! Some lines between message and options.
//! zero one --two three
//!                ^~~~~ cannot find this file
//!          ^~~~~ for this option
//!      ^~~ for this sub-command
//! Zero or more additional
//! lines of information.";
//!
//! assert_eq!(err.to_string(), expected);
//! assert_eq!(decor::exit_code(Some(&err)), 13);
//! ```

mod error;
mod ext;
mod resolve;

pub use decor_core::options::Annotation;

pub use error::{BoxError, DecoratedError, PLACEHOLDER_MESSAGE};
pub use ext::{Decorate, ResultExt};
pub use resolve::{
    Capabilities, ExitCoder, Temporary, exit_code, is_temporary, register_exit_coder,
    register_temporary,
};
