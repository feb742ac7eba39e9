//! Tokenizer for AMPL-style `.dat` parameter files.

use std::fmt;

/// Kind of a lexical token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// The `param` keyword (case-insensitive).
    Param,
    /// A name or a number; classified by the block reader.
    Word(String),
    /// `:=`
    Assign,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `*`
    Star,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Param => f.write_str("param"),
            TokenKind::Word(word) => f.write_str(word),
            TokenKind::Assign => f.write_str(":="),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Star => f.write_str("*"),
        }
    }
}

/// A token with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    /// Returns the word text if this is a [`TokenKind::Word`].
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(word) => Some(word),
            _ => None,
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ':' | ';' | '[' | ']' | ',' | '*' | '#')
}

/// Splits `text` into tokens, dropping whitespace and `#` comments.
///
/// Tokenizing never fails: anything that is not punctuation becomes a
/// [`TokenKind::Word`] and is rejected later if it is neither a name nor a
/// number.
pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        let kind = match c {
            '\n' => {
                line += 1;
                continue;
            }
            c if c.is_whitespace() => continue,
            '#' => {
                while chars.next_if(|&n| n != '\n').is_some() {}
                continue;
            }
            ':' => {
                if chars.next_if_eq(&'=').is_some() {
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            ';' => TokenKind::Semicolon,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '*' => TokenKind::Star,
            _ => {
                let mut word = String::from(c);
                while let Some(n) = chars.next_if(|&n| !is_delimiter(n)) {
                    word.push(n);
                }
                if word.eq_ignore_ascii_case("param") {
                    TokenKind::Param
                } else {
                    TokenKind::Word(word)
                }
            }
        };
        tokens.push(Token { kind, line });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).into_iter().map(|t| t.kind).collect()
    }

    fn word(s: &str) -> TokenKind {
        TokenKind::Word(s.to_string())
    }

    #[test]
    fn test_scalar_statement() {
        assert_eq!(
            kinds("param nmuelles := 2 ;"),
            vec![
                TokenKind::Param,
                word("nmuelles"),
                TokenKind::Assign,
                word("2"),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_slice_header() {
        assert_eq!(
            kinds("param tvia [*,*,3]: 0 1 :="),
            vec![
                TokenKind::Param,
                word("tvia"),
                TokenKind::LBracket,
                TokenKind::Star,
                TokenKind::Comma,
                TokenKind::Star,
                TokenKind::Comma,
                word("3"),
                TokenKind::RBracket,
                TokenKind::Colon,
                word("0"),
                word("1"),
                TokenKind::Assign,
            ]
        );
    }

    #[test]
    fn test_comments_and_lines() {
        let tokens = tokenize("# header\nparam x := 1; # trailing\n\nparam y := 2;");
        assert_eq!(tokens.len(), 10);
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[4].line, 2);
        assert_eq!(tokens[5].line, 4);
    }

    #[test]
    fn test_comment_glued_to_value() {
        assert_eq!(kinds("3.5#note\n4"), vec![word("3.5"), word("4")]);
    }

    #[test]
    fn test_param_keyword_case_insensitive() {
        assert_eq!(kinds("PARAM Param")[..], [TokenKind::Param, TokenKind::Param]);
    }

    #[test]
    fn test_negative_and_exponent_numbers() {
        assert_eq!(kinds("-1.5 2e3"), vec![word("-1.5"), word("2e3")]);
    }
}
