//! Lexer (tokenizer) for Jack source code
//!
//! Converts raw source text into [`Token`]s on demand. Whitespace, `//` line
//! comments and `/* ... */` block comments (including `/** ... */` doc
//! comments) are skipped and never produce tokens.
//!
//! At each position the classes are tried in a fixed order: symbol, integer
//! constant, string constant, identifier-or-keyword. An identifier whose text
//! is in the keyword table becomes a keyword.

use super::tree::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Largest value an integer constant may hold.
pub const MAX_INT_CONSTANT: u16 = 32767;

/// Characters that form single-character symbol tokens.
pub const SYMBOLS: &[char] = &[
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=',
    '~',
];

/// Reserved words of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

static KEYWORDS: LazyLock<FxHashMap<&'static str, Keyword>> = LazyLock::new(|| {
    Keyword::ALL
        .iter()
        .map(|&keyword| (keyword.as_str(), keyword))
        .collect()
});

impl Keyword {
    pub const ALL: [Keyword; 21] = [
        Keyword::Class,
        Keyword::Constructor,
        Keyword::Function,
        Keyword::Method,
        Keyword::Field,
        Keyword::Static,
        Keyword::Var,
        Keyword::Int,
        Keyword::Char,
        Keyword::Boolean,
        Keyword::Void,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::This,
        Keyword::Let,
        Keyword::Do,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Return,
    ];

    /// Look up a word in the keyword table.
    pub fn lookup(word: &str) -> Option<Keyword> {
        KEYWORDS.get(word).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token classes, with the decoded value for constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol(char),
    Identifier(String),
    IntegerConstant(u16),
    StringConstant(String),
}

/// A classified token together with its exact source text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The exact source text of the token (string constants keep their quotes).
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Text written to the artifact: integer constants as their decimal value,
    /// string constants without quotes, everything else verbatim.
    pub fn text(&self) -> String {
        match &self.kind {
            TokenKind::Keyword(keyword) => keyword.as_str().to_string(),
            TokenKind::Symbol(ch) => ch.to_string(),
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::IntegerConstant(value) => value.to_string(),
            TokenKind::StringConstant(value) => value.clone(),
        }
    }

    /// Element name of this token's class in the artifact.
    pub fn label(&self) -> &'static str {
        match self.kind {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::IntegerConstant(_) => "integerConstant",
            TokenKind::StringConstant(_) => "stringConstant",
        }
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Keyword(keyword) => write!(f, "keyword '{}'", keyword),
            TokenKind::Symbol(ch) => write!(f, "symbol '{}'", ch),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::IntegerConstant(value) => write!(f, "integer constant {}", value),
            TokenKind::StringConstant(value) => write!(f, "string constant \"{}\"", value),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Lexer error at {location}: illegal character '{ch}'")]
    IllegalCharacter { ch: char, location: SourceLocation },

    #[error("Lexer error at {location}: unterminated string constant")]
    UnterminatedString { location: SourceLocation },

    #[error("Lexer error at {location}: unterminated comment")]
    UnterminatedComment { location: SourceLocation },

    #[error("Lexer error at {location}: integer constant {text} exceeds 32767")]
    IntegerOutOfRange { text: String, location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::IllegalCharacter { location, .. }
            | LexError::UnterminatedString { location }
            | LexError::UnterminatedComment { location }
            | LexError::IntegerOutOfRange { location, .. } => *location,
        }
    }
}

/// Lexer for Jack source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    halted: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            halted: false,
        }
    }

    /// Skip whitespace and comments, then report whether a token remains.
    pub fn has_more_tokens(&mut self) -> Result<bool, LexError> {
        self.skip_whitespace_and_comments()?;
        Ok(!self.is_at_end())
    }

    /// Scan the next token. `Ok(None)` means the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if !self.has_more_tokens()? {
            return Ok(None);
        }

        let loc = self.current_location();
        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Ok(None),
        };

        let token = if SYMBOLS.contains(&ch) {
            self.advance();
            Token::new(TokenKind::Symbol(ch), ch.to_string(), loc)
        } else if ch.is_ascii_digit() {
            self.integer_constant(loc)?
        } else if ch == '"' {
            self.string_constant(loc)?
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            self.identifier_or_keyword(loc)
        } else {
            return Err(LexError::IllegalCharacter { ch, location: loc });
        };

        Ok(Some(token))
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Location just past the last consumed character.
    pub fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Scan a run of decimal digits
    fn integer_constant(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = text
            .parse::<u16>()
            .ok()
            .filter(|value| *value <= MAX_INT_CONSTANT)
            .ok_or_else(|| LexError::IntegerOutOfRange {
                text: text.clone(),
                location: loc,
            })?;

        Ok(Token::new(TokenKind::IntegerConstant(value), text, loc))
    }

    /// Scan a string constant; the contents are taken raw, without escapes
    fn string_constant(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut value = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance();
                    let lexeme = format!("\"{}\"", value);
                    return Ok(Token::new(TokenKind::StringConstant(value), lexeme, loc));
                }
                '\n' | '\r' => break,
                _ => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { location: loc })
    }

    /// Scan identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match Keyword::lookup(&ident) {
            Some(keyword) => Token::new(TokenKind::Keyword(keyword), ident, loc),
            None => Token::new(TokenKind::Identifier(ident.clone()), ident, loc),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */ and /** ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::UnterminatedComment {
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let result = self.next_token();
        self.halted = result.is_err();
        result.transpose()
    }
}
