//! Character-level tokenizer
//!
//! A single left-to-right scan over one file's text, keeping one accumulating
//! token and an optional open delimiter (string or block comment). The output
//! is lossless: every character of the input lands in exactly one token.

use crate::core::doc::parse_doc_comment;
use crate::core::types::{Token, TokenKind};
use crate::error::AnalyzeError;
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::Path;

lazy_static! {
    /// Completed Word tokens matching this set are reclassified Keyword.
    static ref KEYWORDS: HashSet<&'static str> = [
        "public", "private", "protected", "static", "readonly", "abstract",
        "get", "set", "class", "extends", "implements", "constructor",
        "import", "export", "from", "function", "let", "const", "var",
        "new", "return", "this", "super", "if", "else", "for", "while",
        "do", "switch", "case", "break", "continue", "async", "await",
        "typeof", "instanceof", "in", "of", "interface", "enum",
        "namespace", "declare",
    ]
    .into_iter()
    .collect();
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

/// Open multi-character delimiter the scan is currently inside.
enum OpenDelimiter {
    /// String literal with its quote character.
    Str(char),
    BlockComment,
}

struct Tokenizer<'a> {
    file: &'a Path,
    tokens: Vec<Token>,
    current: Option<Token>,
    open: Option<OpenDelimiter>,
    /// Inside a string: previous character was an unescaped backslash.
    escaped: bool,
    line: usize,
    column: usize,
    depth: usize,
}

/// Tokenizes one file's full text. The only hard-stop condition is an
/// unterminated string at end of line; it aborts the whole analysis run.
pub fn tokenize(file: &Path, text: &str) -> Result<Vec<Token>, AnalyzeError> {
    Tokenizer::new(file).scan(text)
}

impl<'a> Tokenizer<'a> {
    fn new(file: &'a Path) -> Self {
        Self {
            file,
            tokens: Vec::new(),
            current: None,
            open: None,
            escaped: false,
            line: 1,
            column: 0,
            depth: 0,
        }
    }

    fn scan(mut self, text: &str) -> Result<Vec<Token>, AnalyzeError> {
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match self.open {
                Some(OpenDelimiter::Str(delim)) => self.scan_string_char(c, delim)?,
                Some(OpenDelimiter::BlockComment) => self.scan_comment_char(c)?,
                None => {
                    let next = chars.peek().copied();
                    self.scan_char(c, next);
                }
            }

            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }

        // Whatever is still accumulating at end of input flushes as-is; an
        // unterminated block comment keeps its text but carries no doc.
        self.flush();
        Ok(self.tokens)
    }

    fn scan_string_char(&mut self, c: char, delim: char) -> Result<(), AnalyzeError> {
        if c == '\n' {
            return Err(AnalyzeError::UnfinishedString {
                file: self.file.to_path_buf(),
                line: self.line,
            });
        }
        self.push_char(c);
        if self.escaped {
            self.escaped = false;
        } else if c == '\\' {
            self.escaped = true;
        } else if c == delim {
            self.open = None;
            self.flush();
        }
        Ok(())
    }

    fn scan_comment_char(&mut self, c: char) -> Result<(), AnalyzeError> {
        self.push_char(c);
        if c != '/' {
            return Ok(());
        }
        let token = self.current_mut();
        // "/*/" is still open; the terminator must not overlap the opener.
        if token.text.len() < 4 || !token.text.ends_with("*/") {
            return Ok(());
        }
        self.open = None;
        let token = self.current_mut();
        if token.text.trim_start().starts_with("/**") {
            let (text, line) = (token.text.clone(), token.line);
            self.current_mut().doc = Some(parse_doc_comment(&text, self.file, line)?);
        }
        self.flush();
        Ok(())
    }

    fn scan_char(&mut self, c: char, next: Option<char>) {
        match c {
            '\n' => {
                // Ends any line comment implicitly.
                self.flush();
                self.start(TokenKind::Newline, c);
                self.flush();
            }
            _ if self.current_kind() == Some(TokenKind::Comment) => {
                // Line comment swallows everything up to the newline.
                self.push_char(c);
            }
            '"' | '\'' | '`' => {
                self.flush();
                self.start(TokenKind::String, c);
                self.open = Some(OpenDelimiter::Str(c));
                self.escaped = false;
            }
            '/' if matches!(next, Some('/') | Some('*')) => {
                self.flush();
                self.start(TokenKind::Comment, c);
                if next == Some('*') {
                    self.open = Some(OpenDelimiter::BlockComment);
                }
            }
            ' ' | '\t' => self.continue_or_start(TokenKind::Whitespace, c),
            '.' if self.current_kind() == Some(TokenKind::Number) => self.push_char(c),
            _ if c.is_ascii_digit() => {
                // Digits continue an identifier; otherwise they are numeric.
                if self.current_kind() == Some(TokenKind::Word) {
                    self.push_char(c);
                } else {
                    self.continue_or_start(TokenKind::Number, c);
                }
            }
            _ if c.is_alphabetic() || c == '_' => self.continue_or_start(TokenKind::Word, c),
            '(' | '[' | '{' => {
                self.flush();
                self.start(TokenKind::Other, c);
                self.flush();
                // Subsequent tokens sit one level deeper.
                self.depth += 1;
            }
            ')' | ']' | '}' => {
                self.flush();
                // Decrement first: the closer is recorded at the enclosing
                // depth, not the depth of the body it closes.
                self.depth = self.depth.saturating_sub(1);
                self.start(TokenKind::Other, c);
                self.flush();
            }
            _ => {
                // Other is always a singleton, so adjacent punctuation
                // yields separate tokens.
                self.flush();
                self.start(TokenKind::Other, c);
                self.flush();
            }
        }
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current.as_ref().map(|t| t.kind)
    }

    fn current_mut(&mut self) -> &mut Token {
        let (line, column, depth) = (self.line, self.column, self.depth);
        self.current.get_or_insert_with(|| Token {
            text: String::new(),
            kind: TokenKind::Other,
            line,
            column,
            depth,
            doc: None,
        })
    }

    fn start(&mut self, kind: TokenKind, c: char) {
        self.current = Some(Token {
            text: c.to_string(),
            kind,
            line: self.line,
            column: self.column,
            depth: self.depth,
            doc: None,
        });
    }

    fn push_char(&mut self, c: char) {
        self.current_mut().text.push(c);
    }

    fn continue_or_start(&mut self, kind: TokenKind, c: char) {
        if self.current_kind() == Some(kind) {
            self.push_char(c);
        } else {
            self.flush();
            self.start(kind, c);
        }
    }

    fn flush(&mut self) {
        if let Some(mut token) = self.current.take() {
            if token.kind == TokenKind::Word && is_keyword(&token.text) {
                token.kind = TokenKind::Keyword;
            }
            self.tokens.push(token);
        }
    }
}
