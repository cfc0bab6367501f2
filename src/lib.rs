//! Compiles brainfuck into Rust, C or Go source and builds it with the host toolchain.
//!
//! ```no_run
//! use std::path::Path;
//! use bfcc::{Generator, Target, DEFAULT_MEMSIZE};
//!
//! let generator = Generator::new(DEFAULT_MEMSIZE, Target::Rust);
//! generator.generate("++++++++[>++++++++<-]>+.", Path::new("hello"))?;
//! # Ok::<(), bfcc::Error>(())
//! ```

extern crate thiserror;

pub mod codegen;
pub mod interpreter;
pub mod lexer;
pub mod toolchain;

use std::{io, num::NonZeroUsize, path::PathBuf};

use thiserror::Error;

pub use codegen::{CodegenError, Generator, Target};
pub use toolchain::ToolchainError;

/// Cells on the tape unless configured otherwise
pub const DEFAULT_MEMSIZE: NonZeroUsize = match NonZeroUsize::new(30_000) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}
