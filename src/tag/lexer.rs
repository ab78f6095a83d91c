//! Lexer for placeholder tags using logos

use logos::Logos;

use crate::error::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    #[regex(r"<[a-z0-9_-]+>", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    Tag(String),

    #[token("\\<")]
    EscapedOpen,

    #[token("\\\\")]
    EscapedBackslash,

    #[regex(r"[^<\\]+", |lex| lex.slice().to_string())]
    Text(String),
}

/// Lex input into tokens with spans
///
/// Input that does not form a token, such as a `<` that never closes, comes back as text.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(move |(tok, span)| match tok {
            Ok(tok) => (tok, span),
            Err(()) => (Token::Text(input[span.clone()].to_string()), span),
        })
}
