//! Decor Core Types
//!
//! This crate provides the display-side building blocks shared by the
//! `decor` error type and its command-line front end:
//!
//! - **Annotations**: `(token index, comment)` pairs ([`options::Annotation`])
//! - **Option lines**: token layout with column and byte spans ([`options::OptionLine`])
//! - **Rendering**: underline diagrams beneath a command line ([`options::render`])

pub mod options;
