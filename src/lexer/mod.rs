use std::fmt;

pub mod lexer;

pub use self::lexer::Lexer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // `>`: Increment the `data pointer`
    IncPtr,
    // `<`: Decrement the `data pointer`
    DecPtr,

    // `+`: Increment the byte at the `data pointer`
    IncCell,
    // `-`: Decrement the byte at the `data pointer`
    DecCell,

    // `.`: Write the byte at the `data pointer` to the output
    Output,
    // `,`: Read the next byte from the input and store it at the `data pointer`
    Input,

    // `[`: If the byte at the `data pointer` is zero, jump forward past the matching `]`
    LoopOpen,
    // `]`: If the byte at the `data pointer` is non-zero, jump back to the matching `[`
    LoopClose,

    // End of file: no more tokens left
    Eof,

    // Every other character
    Comment(String),
}

impl TokenKind {
    /// The four commands whose consecutive repeats collapse into one token.
    pub fn is_run_length(&self) -> bool {
        matches!(
            self,
            TokenKind::IncPtr | TokenKind::DecPtr | TokenKind::IncCell | TokenKind::DecCell
        )
    }

    /// The source character of a command kind.
    pub fn symbol(&self) -> Option<char> {
        match self {
            TokenKind::IncPtr => Some('>'),
            TokenKind::DecPtr => Some('<'),
            TokenKind::IncCell => Some('+'),
            TokenKind::DecCell => Some('-'),
            TokenKind::Output => Some('.'),
            TokenKind::Input => Some(','),
            TokenKind::LoopOpen => Some('['),
            TokenKind::LoopClose => Some(']'),
            TokenKind::Eof | TokenKind::Comment(_) => None,
        }
    }

    fn from_symbol(c: char) -> Option<TokenKind> {
        match c {
            '>' => Some(TokenKind::IncPtr),
            '<' => Some(TokenKind::DecPtr),
            '+' => Some(TokenKind::IncCell),
            '-' => Some(TokenKind::DecCell),
            '.' => Some(TokenKind::Output),
            ',' => Some(TokenKind::Input),
            '[' => Some(TokenKind::LoopOpen),
            ']' => Some(TokenKind::LoopClose),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IncPtr => write!(f, "INC_PTR"),
            TokenKind::DecPtr => write!(f, "DEC_PTR"),
            TokenKind::IncCell => write!(f, "INC_CELL"),
            TokenKind::DecCell => write!(f, "DEC_CELL"),
            TokenKind::Output => write!(f, "OUTPUT"),
            TokenKind::Input => write!(f, "INPUT"),
            TokenKind::LoopOpen => write!(f, "LOOP_OPEN"),
            TokenKind::LoopClose => write!(f, "LOOP_CLOSE"),
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Comment(_) => write!(f, "COMMENT"),
        }
    }
}

/// Where a token starts in the source text (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A command together with how many times it repeats in a row.
///
/// Only the pointer and cell arithmetic kinds ever carry a `repeat` above 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub repeat: usize,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, repeat: usize) -> Token {
        Token {
            kind,
            repeat,
            location: Location::default(),
        }
    }

    pub fn at(mut self, location: Location) -> Token {
        self.location = location;
        self
    }
}

impl fmt::Display for Token {
    /// Renders the token back to the brainfuck text it was lexed from.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, self.kind.symbol()) {
            (_, Some(c)) => {
                for _ in 0..self.repeat {
                    write!(f, "{}", c)?;
                }
                Ok(())
            }
            (TokenKind::Comment(text), None) => write!(f, "{}", text),
            _ => Ok(()),
        }
    }
}
