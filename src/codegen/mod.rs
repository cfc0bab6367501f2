use std::{fmt, num::NonZeroUsize, path::Path, process::Command};

use clap::ValueEnum;
use thiserror::Error;

use crate::lexer::TokenKind;

pub mod c;
pub mod generator;
pub mod go;
pub mod rust;

pub use self::generator::Generator;

/// A host language the generator can emit.
///
/// Every statement method returns a single line without indentation or a
/// trailing newline; the generator takes care of layout.
pub trait Backend: Sync {
    fn name(&self) -> &'static str;

    /// File extension of the generated source, without the dot
    fn extension(&self) -> &'static str;

    /// One level of indentation in the generated source
    fn indent(&self) -> &'static str {
        "    "
    }

    /// Declares the tape, the cursor and the input routine, and opens the program scope.
    fn prologue(&self, memsize: NonZeroUsize) -> String;

    /// Closes the program scope.
    fn epilogue(&self) -> &'static str;

    fn shift_right(&self, by: usize) -> String;
    fn shift_left(&self, by: usize) -> String;

    fn add(&self, by: usize) -> String;
    fn sub(&self, by: usize) -> String;

    fn write(&self) -> &'static str;
    fn read(&self) -> &'static str;

    fn loop_open(&self) -> &'static str;
    fn loop_close(&self) -> &'static str;

    /// Sets the current cell to zero, the rewrite of `[-]`
    fn clear(&self) -> &'static str;

    /// The native command that turns `source` into an optimized, stripped binary at `output`.
    fn build_command(&self, source: &Path, output: &Path) -> Command;
}

#[derive(ValueEnum, Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Target {
    /// Rust, built with rustc
    #[default]
    Rust,
    /// C, built with the system cc
    C,
    /// Go, built with the go toolchain
    Go,
}

impl Target {
    pub fn backend(self) -> &'static dyn Backend {
        match self {
            Target::Rust => &rust::RustBackend,
            Target::C => &c::CBackend,
            Target::Go => &go::GoBackend,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.backend().name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodegenError {
    #[error("unhandled token: {kind} at index {index}")]
    UnhandledToken { kind: TokenKind, index: usize },

    #[error("`]` at index {index} has no matching `[`")]
    UnmatchedLoopClose { index: usize },

    #[error("`[` at index {index} is never closed")]
    UnclosedLoop { index: usize },
}
