mod token;

pub use self::token::*;

use std::{
    collections::{HashMap, VecDeque},
    error::Error,
    fmt::Display,
    io::BufRead,
    iter::Peekable,
    str::Chars,
};

use once_cell::sync::Lazy;

static KEYWORDS: Lazy<HashMap<&'static str, Token>> = Lazy::new(|| {
    HashMap::from_iter([
        ("class", Token::Class),
        ("return", Token::Return),
        ("if", Token::If),
        ("else", Token::Else),
        ("def", Token::Def),
        ("print", Token::Print),
        ("and", Token::And),
        ("or", Token::Or),
        ("not", Token::Not),
        ("None", Token::None),
        ("True", Token::True),
        ("False", Token::False),
    ])
});

/// Single-character operators; `==`, `!=`, `<=` and `>=` are matched before
/// this set applies.
const SYMBOLS: &str = "+-*/.><,()=:?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError(String);

impl LexError {
    fn new(line: usize, message: impl Display) -> Self {
        LexError(format!("line {line}: {message}"))
    }
}

pub type LexResult<T> = Result<T, LexError>;

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Error for LexError {}

/// Indentation-sensitive tokenizer over a readable character stream.
///
/// Input is consumed one line at a time; each non-blank line contributes its
/// `Indent`/`Dedent` run, the line's own tokens and a trailing `Newline` to a
/// pending queue that [`Lexer::advance`] drains. Open indents are closed with
/// `Dedent` tokens exactly once when the input runs out.
#[derive(Debug)]
pub struct Lexer<R> {
    input: R,
    current: Token,
    pending: VecDeque<Token>,
    prev_indent: usize,
    line: usize,
    indents_closed: bool,
}

impl<R> Lexer<R>
where
    R: BufRead,
{
    /// Create a lexer and position it on the first token of `input`.
    pub fn new(input: R) -> LexResult<Self> {
        let mut lexer = Self {
            input,
            current: Token::Eof,
            pending: VecDeque::new(),
            prev_indent: 0,
            line: 0,
            indents_closed: false,
        };
        lexer.advance()?;

        Ok(lexer)
    }

    /// The token most recently yielded by [`Lexer::advance`].
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Number of the most recently read source line, counting from 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Consume input until the next token is determined and make it current.
    pub fn advance(&mut self) -> LexResult<&Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                self.current = token;
                return Ok(&self.current);
            }

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|err| LexError::new(self.line, err))?;

            if read == 0 {
                if !self.indents_closed {
                    self.indents_closed = true;
                    for _ in 0..self.prev_indent {
                        self.pending.push_back(Token::Dedent);
                    }
                    self.prev_indent = 0;
                    continue;
                }

                self.current = Token::Eof;
                return Ok(&self.current);
            }

            self.line += 1;
            self.tokenize_line(&line)?;
        }
    }

    /// Assert that the current token equals `expected`.
    pub fn expect(&self, expected: &Token) -> LexResult<()> {
        if &self.current == expected {
            Ok(())
        } else {
            Err(LexError::new(
                self.line,
                format!("expected {expected}, found {}", self.current),
            ))
        }
    }

    /// Advance, then assert that the new current token equals `expected`.
    pub fn expect_next(&mut self, expected: &Token) -> LexResult<()> {
        self.advance()?;
        self.expect(expected)
    }

    /// Assert that the current token is an identifier and yield its name.
    pub fn expect_id(&self) -> LexResult<String> {
        match &self.current {
            Token::Id(name) => Ok(name.clone()),
            token => Err(LexError::new(
                self.line,
                format!("expected an identifier, found {token}"),
            )),
        }
    }

    /// Advance, then assert that the new current token is an identifier.
    pub fn expect_next_id(&mut self) -> LexResult<String> {
        self.advance()?;
        self.expect_id()
    }

    fn tokenize_line(&mut self, raw: &str) -> LexResult<()> {
        let line = raw.trim_end_matches('\n').trim_end_matches('\r');

        // Whitespace-only lines contribute no tokens, not even Newline.
        if line.trim().is_empty() {
            return Ok(());
        }

        let indent = line.len() - line.trim_start_matches(' ').len();
        self.parse_indents(indent)?;

        let mut chars = line[indent..].chars().peekable();
        while let Some(&next) = chars.peek() {
            match next {
                ' ' => {
                    chars.next();
                }
                '\t' => {
                    return Err(LexError::new(self.line, "tab characters are not allowed"));
                }
                '"' | '\'' => {
                    chars.next();
                    self.lex_string(&mut chars, next)?;
                }
                '0'..='9' => self.lex_number(&mut chars)?,
                'a'..='z' | 'A'..='Z' | '_' => self.lex_word(&mut chars),
                _ => self.lex_symbol(&mut chars)?,
            }
        }

        self.pending.push_back(Token::Newline);
        Ok(())
    }

    /// Turn a leading-space count into the `Indent`/`Dedent` run against the
    /// previous line's level. Two spaces form one level; odd counts are
    /// malformed.
    fn parse_indents(&mut self, spaces: usize) -> LexResult<()> {
        if spaces % 2 != 0 {
            return Err(LexError::new(
                self.line,
                format!("odd indentation of {spaces} spaces"),
            ));
        }

        let level = spaces / 2;
        if level > self.prev_indent {
            for _ in 0..level - self.prev_indent {
                self.pending.push_back(Token::Indent);
            }
        } else {
            for _ in 0..self.prev_indent - level {
                self.pending.push_back(Token::Dedent);
            }
        }

        self.prev_indent = level;
        Ok(())
    }

    /// Content runs until the matching quote on the same line; the bytes in
    /// between form the value, with no escape processing.
    fn lex_string(&mut self, chars: &mut Peekable<Chars<'_>>, quote: char) -> LexResult<()> {
        let mut value = String::new();

        for next in chars.by_ref() {
            if next == quote {
                self.pending.push_back(Token::String(value));
                return Ok(());
            }
            value.push(next);
        }

        Err(LexError::new(self.line, "unterminated string literal"))
    }

    fn lex_number(&mut self, chars: &mut Peekable<Chars<'_>>) -> LexResult<()> {
        let mut digits = String::new();
        while let Some(next) = chars.next_if(|c| c.is_ascii_digit()) {
            digits.push(next);
        }

        let value = digits
            .parse::<i64>()
            .map_err(|_| LexError::new(self.line, format!("malformed number '{digits}'")))?;

        self.pending.push_back(Token::Number(value));
        Ok(())
    }

    fn lex_word(&mut self, chars: &mut Peekable<Chars<'_>>) {
        let mut word = String::new();
        while let Some(next) = chars.next_if(|c| c.is_ascii_alphanumeric() || *c == '_') {
            word.push(next);
        }

        match KEYWORDS.get(word.as_str()) {
            Some(keyword) => self.pending.push_back(keyword.clone()),
            None => self.pending.push_back(Token::Id(word)),
        }
    }

    fn lex_symbol(&mut self, chars: &mut Peekable<Chars<'_>>) -> LexResult<()> {
        let Some(first) = chars.next() else {
            return Ok(());
        };

        let compound = match (first, chars.peek().copied()) {
            ('=', Some('=')) => Some(Token::Eq),
            ('!', Some('=')) => Some(Token::NotEq),
            ('<', Some('=')) => Some(Token::LessOrEq),
            ('>', Some('=')) => Some(Token::GreaterOrEq),
            _ => None,
        };

        if let Some(token) = compound {
            chars.next();
            self.pending.push_back(token);
            return Ok(());
        }

        if SYMBOLS.contains(first) {
            self.pending.push_back(Token::Char(first));
            return Ok(());
        }

        Err(LexError::new(
            self.line,
            format!("unrecognized character '{first}'"),
        ))
    }
}
