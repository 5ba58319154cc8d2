//! Library entrypoint for `pysh`.
//!
//! Exposes the external scanner that sits beneath the incremental parser and
//! resolves the tokens a context-free grammar cannot: block structure from
//! indentation, multi-modal string literals, and the Python-versus-subprocess
//! line disambiguation.

pub mod scanner;
