//! Tag substitution over plain text
//!
//! Only the placeholder tag is understood here: `<key>` is replaced by whatever the
//! resolver returns for `key`. `\<` writes a literal `<` and `\\` a literal backslash.
//! Everything else passes through untouched.

pub mod lexer;
mod render;

pub use render::expand;
