pub mod padder;
pub mod unpadder;

pub use padder::*;
pub use unpadder::*;

use crate::error::{PaddingError, Result};

/// Data offered to a padding context.
///
/// Only raw bytes are accepted; text must be encoded by the caller first.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
}

impl<'a> Input<'a> {
    /// Borrow the raw bytes, rejecting text
    pub fn bytes(self) -> Result<&'a [u8]> {
        match self {
            Input::Bytes(b) => Ok(b),
            Input::Text(_) => Err(PaddingError::Encoding),
        }
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(b: &'a [u8]) -> Self {
        Input::Bytes(b)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Input::Bytes(b)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        Input::Bytes(b)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Text(s)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Input::Text(s)
    }
}

/// Incremental transform shared by the padder and the unpadder.
///
/// `update` may be called any number of times and returns every byte that is
/// already fully determined. `finalize` flushes the rest and may be called once;
/// after that every call fails with [`PaddingError::AlreadyFinalized`].
pub trait PaddingContext {
    fn update<'a>(&mut self, data: impl Into<Input<'a>>) -> Result<Vec<u8>>;
    fn finalize(&mut self) -> Result<Vec<u8>>;
}

/// Buffer state of a context
#[derive(Debug)]
pub(crate) enum State {
    Active(Vec<u8>),
    Finalized,
}

impl State {
    pub(crate) fn buffer_mut(&mut self) -> Result<&mut Vec<u8>> {
        match self {
            State::Active(buffer) => Ok(buffer),
            State::Finalized => Err(PaddingError::AlreadyFinalized),
        }
    }

    /// Take the buffer out, leaving the context finalized
    pub(crate) fn take(&mut self) -> Result<Vec<u8>> {
        match std::mem::replace(self, State::Finalized) {
            State::Active(buffer) => Ok(buffer),
            State::Finalized => Err(PaddingError::AlreadyFinalized),
        }
    }
}

/// Split off the first `finished_blocks * block_size` bytes of `buffer`,
/// leaving the remainder in place.
pub(crate) fn emit_blocks(buffer: &mut Vec<u8>, finished_blocks: usize, block_size: usize) -> Vec<u8> {
    let emit = finished_blocks * block_size;
    buffer.drain(..emit).collect()
}
