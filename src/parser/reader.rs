//! Shape-specific block readers.
//!
//! A statement runs from `param NAME` to the next `;`. Its body decides the
//! shape:
//!
//! | body starts with | shape                         |
//! |------------------|-------------------------------|
//! | `:= [`           | sliced 3-D (chained slices)   |
//! | `:=`             | scalar (one token) or vector  |
//! | `:`              | matrix                        |
//! | `[`              | sliced 3-D                    |
//!
//! Matrix bodies are free-format: rows of `index v1 ... vK` may share a line
//! or wrap across lines.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::token::{tokenize, Token, TokenKind};
use super::value::{ParamSet, ParamValue, Table, Vector};
use super::ParseError;

/// Parses one file's text into a fresh [`ParamSet`].
///
/// # Examples
///
/// ```
/// use dock_vrp::parser::parse_str;
///
/// let params = parse_str("param DemE := 0 0 1 6 2 4 ; # deliveries").unwrap();
/// let dem = params.get("DemE").and_then(|p| p.as_vector()).unwrap();
/// assert_eq!(dem.get(&1), Some(&6.0));
/// assert_eq!(dem.len(), 3);
/// ```
pub fn parse_str(text: &str) -> Result<ParamSet, ParseError> {
    let mut set = ParamSet::new();
    parse_into(text, &mut set)?;
    Ok(set)
}

/// Parses `text` and adds its declarations to `set`.
///
/// Used to load an instance split across several files: a name already
/// present in `set` is a [`ParseError::Duplicate`] unless both declarations
/// are slices with different keys.
pub fn parse_into(text: &str, set: &mut ParamSet) -> Result<(), ParseError> {
    let tokens = tokenize(text);
    let mut pos = 0;
    while pos < tokens.len() {
        pos = statement(&tokens, pos, set)?;
    }
    Ok(())
}

fn is_name(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unexpected(expected: &'static str, token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        expected,
        found: token.kind.to_string(),
        line: token.line,
    }
}

/// Reads the statement starting at `start`; returns the position after its `;`.
fn statement(tokens: &[Token], start: usize, set: &mut ParamSet) -> Result<usize, ParseError> {
    let keyword = &tokens[start];
    if keyword.kind != TokenKind::Param {
        return Err(unexpected("`param`", keyword));
    }

    let name = match tokens.get(start + 1) {
        Some(token) => token
            .word()
            .filter(|word| is_name(word))
            .ok_or_else(|| unexpected("parameter name", token))?,
        None => {
            return Err(ParseError::UnexpectedEnd {
                expected: "parameter name",
                line: keyword.line,
            })
        }
    };

    let body_start = start + 2;
    let end = tokens[body_start..]
        .iter()
        .position(|t| matches!(t.kind, TokenKind::Semicolon | TokenKind::Param))
        .map(|offset| body_start + offset)
        .filter(|&end| tokens[end].kind == TokenKind::Semicolon)
        .ok_or_else(|| ParseError::Unterminated {
            name: name.to_string(),
            line: keyword.line,
        })?;

    let block = Block {
        name,
        end_line: tokens[end].line,
    };
    let value = block.read(&tokens[body_start..end])?;
    debug!(param = name, shape = %value.shape(), line = keyword.line, "parsed parameter block");

    set.declare(name, value, keyword.line)?;
    Ok(end + 1)
}

/// Context for reading the body of one statement.
struct Block<'a> {
    name: &'a str,
    /// Line of the terminating `;`.
    end_line: usize,
}

impl Block<'_> {
    fn read(&self, body: &[Token]) -> Result<ParamValue, ParseError> {
        const EXPECTED: &str = "`:=`, `:` or `[`";
        match body.first().map(|t| &t.kind) {
            Some(TokenKind::Assign) => match body.get(1).map(|t| &t.kind) {
                Some(TokenKind::LBracket) => self.slices(&body[1..]),
                _ => self.pairs(&body[1..]),
            },
            Some(TokenKind::Colon) => self.matrix(&body[1..]).map(ParamValue::Matrix),
            Some(TokenKind::LBracket) => self.slices(body),
            Some(_) => Err(unexpected(EXPECTED, &body[0])),
            None => Err(self.premature_end(EXPECTED)),
        }
    }

    fn premature_end(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: TokenKind::Semicolon.to_string(),
            line: self.end_line,
        }
    }

    fn index(&self, token: &Token) -> Result<usize, ParseError> {
        let word = token.word().ok_or_else(|| unexpected("index", token))?;
        word.parse().map_err(|_| ParseError::InvalidIndex {
            name: self.name.to_string(),
            token: word.to_string(),
            line: token.line,
        })
    }

    fn number(&self, token: &Token) -> Result<f64, ParseError> {
        let word = token.word().ok_or_else(|| unexpected("number", token))?;
        word.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber {
                name: self.name.to_string(),
                token: word.to_string(),
                line: token.line,
            })
    }

    fn duplicate_index(&self, index: usize, token: &Token) -> ParseError {
        ParseError::DuplicateIndex {
            name: self.name.to_string(),
            index,
            line: token.line,
        }
    }

    /// Scalar (`:= v`) or vector (`:= i1 v1 i2 v2 ...`).
    fn pairs(&self, tokens: &[Token]) -> Result<ParamValue, ParseError> {
        if let [single] = tokens {
            return self.number(single).map(ParamValue::Scalar);
        }
        if let Some(last) = tokens.last().filter(|_| tokens.len() % 2 == 1) {
            return Err(ParseError::UnpairedValue {
                name: self.name.to_string(),
                line: last.line,
            });
        }

        let mut vector = Vector::new();
        for pair in tokens.chunks_exact(2) {
            let index = self.index(&pair[0])?;
            let value = self.number(&pair[1])?;
            if vector.insert(index, value).is_some() {
                return Err(self.duplicate_index(index, &pair[0]));
            }
        }
        Ok(ParamValue::Vector(vector))
    }

    /// `c1 ... cK := r1 v11 ... v1K r2 ...` (the leading `:` already consumed).
    fn matrix(&self, tokens: &[Token]) -> Result<Table, ParseError> {
        let assign = tokens
            .iter()
            .position(|t| t.kind == TokenKind::Assign)
            .ok_or_else(|| self.premature_end("`:=`"))?;

        let header = &tokens[..assign];
        if header.is_empty() {
            return Err(unexpected("column index", &tokens[assign]));
        }
        let mut columns = Vec::with_capacity(header.len());
        let mut seen = BTreeSet::new();
        for token in header {
            let col = self.index(token)?;
            if !seen.insert(col) {
                return Err(self.duplicate_index(col, token));
            }
            columns.push(col);
        }

        self.rows(columns, &tokens[assign + 1..])
    }

    /// Reads `index v1 ... vK` rows; line breaks inside the body are free.
    fn rows(&self, columns: Vec<usize>, tokens: &[Token]) -> Result<Table, ParseError> {
        let width = columns.len() + 1;
        let mut table = Table::new(columns);
        let mut seen = BTreeSet::new();

        let rows = tokens.chunks_exact(width);
        if let [first, ..] = rows.remainder() {
            return Err(ParseError::RowLength {
                name: self.name.to_string(),
                line: first.line,
                expected: width - 1,
                found: rows.remainder().len() - 1,
            });
        }

        for row in rows {
            let index = self.index(&row[0])?;
            if !seen.insert(index) {
                return Err(self.duplicate_index(index, &row[0]));
            }
            let values = row[1..]
                .iter()
                .map(|t| self.number(t))
                .collect::<Result<Vec<_>, _>>()?;
            table.push_row(index, values);
        }

        Ok(table)
    }

    /// One or more `[*,*,f]: header := rows` blocks.
    fn slices(&self, tokens: &[Token]) -> Result<ParamValue, ParseError> {
        let mut slices = BTreeMap::new();
        let mut rest = tokens;

        while let Some(open) = rest.first() {
            let key = self.slice_key(rest)?;
            let block = &rest[8..];
            let next = block
                .iter()
                .position(|t| t.kind == TokenKind::LBracket)
                .unwrap_or(block.len());
            let table = self.matrix(&block[..next])?;
            if slices.insert(key, table).is_some() {
                return Err(ParseError::Duplicate {
                    name: self.name.to_string(),
                    slice: Some(key),
                    line: open.line,
                });
            }
            rest = &block[next..];
        }

        Ok(ParamValue::Sliced(slices))
    }

    /// Reads `[ * , * , key ] :` and returns `key`.
    fn slice_key(&self, tokens: &[Token]) -> Result<usize, ParseError> {
        let expect = |at: usize, kind: TokenKind, expected: &'static str| match tokens.get(at) {
            Some(token) if token.kind == kind => Ok(()),
            Some(token) => Err(unexpected(expected, token)),
            None => Err(self.premature_end(expected)),
        };

        expect(0, TokenKind::LBracket, "`[`")?;
        expect(1, TokenKind::Star, "`*`")?;
        expect(2, TokenKind::Comma, "`,`")?;
        expect(3, TokenKind::Star, "`*`")?;
        expect(4, TokenKind::Comma, "`,`")?;
        let key = match tokens.get(5) {
            Some(token) => self.index(token)?,
            None => return Err(self.premature_end("slice index")),
        };
        expect(6, TokenKind::RBracket, "`]`")?;
        expect(7, TokenKind::Colon, "`:`")?;
        Ok(key)
    }
}
