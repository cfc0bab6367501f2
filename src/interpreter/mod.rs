pub mod token_interpreter;

use std::{
    io::{self, Read, Write},
    num::NonZeroUsize,
};

use thiserror::Error;

pub use self::token_interpreter::Interpreter;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Data pointer ({pointer}) out of bounds (max length {len})")]
    DataPointerOutOfBounds { pointer: usize, len: usize },

    #[error("byte not read")]
    InputExhausted,

    #[error("unbalanced loop at index {index}")]
    UnbalancedLoop { index: usize },

    #[error("IO Error")]
    Io(#[from] io::Error),
}

/// The machine a brainfuck program runs on: a tape of integer cells, a pointer into it and two streams.
pub struct Runtime<R, W> {
    /// Pointer into the heap
    data_pointer: usize,

    /// Our statically allocated heap
    heap: Vec<i64>,

    in_stream: R,
    out_stream: W,
}

impl<R: Read, W: Write> Runtime<R, W> {
    pub fn new(heap_size: NonZeroUsize, in_stream: R, out_stream: W) -> Self {
        Self {
            data_pointer: 0,
            heap: vec![0; heap_size.get()],
            in_stream,
            out_stream,
        }
    }

    /// Read exactly one byte from the input into the cell at the data pointer
    pub fn read(&mut self) -> Result<(), RuntimeError> {
        self.check_data_pointer()?;
        let mut byte = [0u8; 1];
        match self.in_stream.read(&mut byte)? {
            1 => {
                self.heap[self.data_pointer] = i64::from(byte[0]);
                Ok(())
            }
            _ => Err(RuntimeError::InputExhausted),
        }
    }

    /// Write the low 8 bits of the cell at the data pointer to the output
    pub fn write(&mut self) -> Result<(), RuntimeError> {
        self.check_data_pointer()?;
        self.out_stream
            .write_all(&[self.heap[self.data_pointer] as u8])?;
        Ok(())
    }

    pub fn deref_and_add_value(&mut self, by: i64) -> Result<(), RuntimeError> {
        self.check_data_pointer()?;
        self.heap[self.data_pointer] = self.heap[self.data_pointer].wrapping_add(by);
        Ok(())
    }

    pub fn deref_and_sub_value(&mut self, by: i64) -> Result<(), RuntimeError> {
        self.check_data_pointer()?;
        self.heap[self.data_pointer] = self.heap[self.data_pointer].wrapping_sub(by);
        Ok(())
    }

    pub fn shift_data_pointer(&mut self, by: isize) {
        self.data_pointer = self.data_pointer.wrapping_add_signed(by);
        // we don't check that the data pointer is valid on shifts
        // we only check that it's valid once it's read/written to
    }

    /// is the value at the data pointer zero?
    pub fn value_is_zero(&self) -> Result<bool, RuntimeError> {
        self.check_data_pointer()?;
        Ok(self.heap[self.data_pointer] == 0)
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.out_stream.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out_stream
    }

    /// check if the data pointer is within bounds
    fn check_data_pointer(&self) -> Result<(), RuntimeError> {
        if self.data_pointer >= self.heap.len() {
            return Err(RuntimeError::DataPointerOutOfBounds {
                pointer: self.data_pointer,
                len: self.heap.len(),
            });
        }
        Ok(())
    }
}
