use std::{num::NonZeroUsize, path::Path};

use crate::{
    lexer::{Lexer, Token, TokenKind},
    toolchain, Error,
};

use super::{Backend, CodegenError, Target};

/// `[-]` spans three tokens
const CLEAR_IDIOM_LEN: usize = 3;

/// Turns brainfuck programs into host language source and hands them to the host toolchain.
///
/// The tape size and the target are fixed for the generator's lifetime; every call is
/// independent of the ones before it.
#[derive(Debug, Clone, Copy)]
pub struct Generator {
    memsize: NonZeroUsize,
    target: Target,
}

impl Generator {
    pub fn new(memsize: NonZeroUsize, target: Target) -> Self {
        Self { memsize, target }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn backend(&self) -> &'static dyn Backend {
        self.target.backend()
    }

    /// Lex `program` and generate its source.
    pub fn source_for(&self, program: &str) -> Result<String, CodegenError> {
        let tokens = Lexer::new(program).tokens();
        self.generate_source(&tokens)
    }

    pub fn generate_source(&self, tokens: &[Token]) -> Result<String, CodegenError> {
        let backend = self.backend();
        tracing::debug!(
            tokens = tokens.len(),
            target = backend.name(),
            memsize = self.memsize.get(),
            "generating source"
        );

        let mut source = backend.prologue(self.memsize);
        // indices of the `[` tokens whose loops are still open
        let mut open_loops: Vec<usize> = vec![];

        let mut index = 0;
        while index < tokens.len() {
            let token = &tokens[index];
            let depth = open_loops.len();

            match &token.kind {
                TokenKind::IncPtr => {
                    emit(&mut source, backend, depth, &backend.shift_right(token.repeat))
                }
                TokenKind::DecPtr => {
                    emit(&mut source, backend, depth, &backend.shift_left(token.repeat))
                }
                TokenKind::IncCell => {
                    emit(&mut source, backend, depth, &backend.add(token.repeat))
                }
                TokenKind::DecCell => {
                    emit(&mut source, backend, depth, &backend.sub(token.repeat))
                }
                TokenKind::Output => emit(&mut source, backend, depth, backend.write()),
                TokenKind::Input => emit(&mut source, backend, depth, backend.read()),
                TokenKind::LoopOpen if is_clear_idiom(&tokens[index..]) => {
                    tracing::trace!(index, "rewriting [-] to a cell clear");
                    emit(&mut source, backend, depth, backend.clear());
                    index += CLEAR_IDIOM_LEN;
                    continue;
                }
                TokenKind::LoopOpen => {
                    emit(&mut source, backend, depth, backend.loop_open());
                    open_loops.push(index);
                }
                TokenKind::LoopClose => {
                    if open_loops.pop().is_none() {
                        return Err(CodegenError::UnmatchedLoopClose { index });
                    }
                    emit(&mut source, backend, depth - 1, backend.loop_close());
                }
                kind @ (TokenKind::Eof | TokenKind::Comment(_)) => {
                    return Err(CodegenError::UnhandledToken {
                        kind: kind.clone(),
                        index,
                    });
                }
            }

            index += 1;
        }

        if let Some(&index) = open_loops.last() {
            return Err(CodegenError::UnclosedLoop { index });
        }

        source.push_str(backend.epilogue());
        Ok(source)
    }

    /// Compile `program` into a binary at `output`.
    ///
    /// The generated source is kept next to the binary as `<output>.<ext>`. Nothing is
    /// written when generation fails.
    pub fn generate(&self, program: &str, output: &Path) -> Result<(), Error> {
        let backend = self.backend();
        let source = self.source_for(program)?;

        let source_path = toolchain::source_path(output, backend.extension());
        toolchain::write_source(&source_path, &source).map_err(|err| Error::Io {
            path: source_path.clone(),
            source: err,
        })?;

        toolchain::build(backend, &source_path, output)?;
        Ok(())
    }
}

/// Does `window` start with `[`, a run of `-` and `]`?
fn is_clear_idiom(window: &[Token]) -> bool {
    match window {
        [open, dec, close, ..] => {
            open.kind == TokenKind::LoopOpen
                && dec.kind == TokenKind::DecCell
                && close.kind == TokenKind::LoopClose
        }
        _ => false,
    }
}

fn emit(source: &mut String, backend: &dyn Backend, depth: usize, statement: &str) {
    // the program body already sits one level deep
    for _ in 0..=depth {
        source.push_str(backend.indent());
    }
    source.push_str(statement);
    source.push('\n');
}
