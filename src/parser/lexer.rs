//! Logos-based lexer for BBj
//!
//! Keywords are not distinguished here: BBj keywords are case-insensitive and
//! most of them are only reserved at the start of a statement, so the parser
//! classifies identifiers itself.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Token kinds handed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    Newline,
    Ident,
    Number,
    String,
    ColonColon,
    Colon,
    Semicolon,
    Comma,
    Dot,
    Hash,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Eq,
    NotEq,
    LtEq,
    GtEq,
    Lt,
    Gt,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Error,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Tokens that end a statement.
    pub fn is_statement_end(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Semicolon)
    }
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }

    /// Case-insensitive keyword test.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Ident && self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    // BBj type suffixes: `$` string, `%` integer, `!` object
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*[$%!]?")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    // A doubled quote is an escaped quote
    #[regex(r#""([^"\r\n]|"")*""#)]
    String,

    #[token("::")]
    ColonColon,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("=")]
    Eq,

    #[token("<>")]
    NotEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("^")]
    Caret,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => TokenKind::Whitespace,
            LogosToken::Newline => TokenKind::Newline,
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::Number => TokenKind::Number,
            LogosToken::String => TokenKind::String,
            LogosToken::ColonColon => TokenKind::ColonColon,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::Hash => TokenKind::Hash,
            LogosToken::LParen => TokenKind::LParen,
            LogosToken::RParen => TokenKind::RParen,
            LogosToken::LBracket => TokenKind::LBracket,
            LogosToken::RBracket => TokenKind::RBracket,
            LogosToken::Eq => TokenKind::Eq,
            LogosToken::NotEq => TokenKind::NotEq,
            LogosToken::LtEq => TokenKind::LtEq,
            LogosToken::GtEq => TokenKind::GtEq,
            LogosToken::Lt => TokenKind::Lt,
            LogosToken::Gt => TokenKind::Gt,
            LogosToken::Plus => TokenKind::Plus,
            LogosToken::Minus => TokenKind::Minus,
            LogosToken::Star => TokenKind::Star,
            LogosToken::Slash => TokenKind::Slash,
            LogosToken::Caret => TokenKind::Caret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_identifier_suffixes() {
        let tokens: Vec<_> = tokenize("name$ count% obj!")
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["name$", "count%", "obj!"]);
    }

    #[test]
    fn test_doubled_quote_string() {
        let tokens = tokenize(r#""say ""hi""""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
    }

    #[test]
    fn test_empty_strings_stay_separate() {
        assert_eq!(
            kinds(r#"mod="",time="""#),
            vec![
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::String,
                TokenKind::Comma,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::String,
            ]
        );
    }

    #[test]
    fn test_offsets_and_ranges() {
        let tokens = tokenize("a :: b");
        assert_eq!(tokens[2].kind, TokenKind::ColonColon);
        assert_eq!(tokens[2].range(), TextRange::new(2.into(), 4.into()));
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds("<> <= >= < >"),
            vec![
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Lt,
                TokenKind::Gt
            ]
        );
    }

    #[test]
    fn test_unknown_character_is_error() {
        assert!(kinds("a ~ b").contains(&TokenKind::Error));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let tokens = tokenize("OpEn");
        assert!(tokens[0].is_keyword("open"));
    }
}
