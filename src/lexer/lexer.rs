use super::{Location, Token, TokenKind};

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human Readable positions in file */
    pub cur_line: usize,
    pub cur_col: usize,

    chars: std::iter::Peekable<std::str::Chars<'a>>,
    keep_comments: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a str) -> Lexer<'a> {
        Lexer {
            cur_col: 1,
            cur_line: 1,

            chars: chars.chars().peekable(),
            keep_comments: false,
        }
    }

    /// Emit runs of non-command characters as `Comment` tokens instead of dropping them.
    pub fn with_comments(mut self, keep: bool) -> Lexer<'a> {
        self.keep_comments = keep;
        self
    }

    fn location(&self) -> Location {
        Location {
            line: self.cur_line,
            col: self.cur_col,
        }
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.cur_col += 1;
        if c == '\n' {
            self.cur_line += 1;
            self.cur_col = 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.consume_char();
        }
    }

    /// Swallow `first` and every following character up to the next command.
    ///
    /// The text is only collected when comments are kept.
    fn consume_comment(&mut self, first: char) -> Option<String> {
        let mut comment = self.keep_comments.then(|| String::from(first));
        while let Some(&c) = self.chars.peek() {
            if TokenKind::from_symbol(c).is_some() {
                break;
            }
            if let Some(text) = comment.as_mut() {
                text.push(c);
            }
            self.consume_char();
        }
        comment
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let location = self.location();

            let Some(c) = self.consume_char() else {
                return Token::new(TokenKind::Eof, 1).at(location);
            };

            match TokenKind::from_symbol(c) {
                Some(kind) if kind.is_run_length() => {
                    let mut repeat = 1;
                    while self.chars.peek() == Some(&c) {
                        self.consume_char();
                        repeat += 1;
                    }
                    return Token::new(kind, repeat).at(location);
                }
                Some(kind) => return Token::new(kind, 1).at(location),
                None => {
                    if let Some(comment) = self.consume_comment(c) {
                        return Token::new(TokenKind::Comment(comment), 1).at(location);
                    }
                }
            }
        }
    }

    /// Lex the whole input into a token sequence.
    pub fn tokens(self) -> Vec<Token> {
        self.collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token {
                kind: TokenKind::Eof,
                ..
            } => None,
            token => Some(token),
        }
    }
}
