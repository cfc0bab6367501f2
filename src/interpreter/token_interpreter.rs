use std::io::{Read, Write};

use crate::lexer::{Token, TokenKind};

use super::{Runtime, RuntimeError};

/// Runs a token stream directly, as the reference for what generated programs must do.
#[derive(Debug, Default)]
pub struct Interpreter {}

impl Interpreter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn run<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        tokens: &[Token],
    ) -> Result<(), RuntimeError> {
        let jumps = jump_table(tokens)?;
        tracing::debug!(tokens = tokens.len(), "interpreting");

        let mut pc = 0;
        while pc < tokens.len() {
            let token = &tokens[pc];
            match token.kind {
                TokenKind::IncPtr => runtime.shift_data_pointer(token.repeat as isize),
                TokenKind::DecPtr => runtime.shift_data_pointer(-(token.repeat as isize)),
                TokenKind::IncCell => runtime.deref_and_add_value(token.repeat as i64)?,
                TokenKind::DecCell => runtime.deref_and_sub_value(token.repeat as i64)?,
                TokenKind::Output => runtime.write()?,
                TokenKind::Input => runtime.read()?,
                TokenKind::LoopOpen => {
                    if runtime.value_is_zero()? {
                        // land on the `]`, the ++ below steps past it
                        pc = jumps[pc];
                    }
                }
                TokenKind::LoopClose => {
                    if !runtime.value_is_zero()? {
                        pc = jumps[pc];
                    }
                }
                // comments do nothing when run
                TokenKind::Eof | TokenKind::Comment(_) => {}
            }
            pc += 1;
        }

        runtime.flush()
    }
}

/// For every brace, the index of its partner. Other entries are unused.
fn jump_table(tokens: &[Token]) -> Result<Vec<usize>, RuntimeError> {
    let mut jumps = vec![0; tokens.len()];
    let mut open = vec![];

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LoopOpen => open.push(index),
            TokenKind::LoopClose => {
                let start = open
                    .pop()
                    .ok_or(RuntimeError::UnbalancedLoop { index })?;
                jumps[start] = index;
                jumps[index] = start;
            }
            _ => {}
        }
    }

    match open.pop() {
        Some(index) => Err(RuntimeError::UnbalancedLoop { index }),
        None => Ok(jumps),
    }
}
