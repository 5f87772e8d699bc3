use super::{emit_blocks, Input, PaddingContext, State};
use crate::error::{PaddingError, Result};

/// Streaming PKCS#7 unpadder
///
/// The block carrying the pad length can only be recognised once the input is
/// known to be complete, so `update` always keeps the last full block (and any
/// partial tail) buffered. `finalize` validates the pad in constant time and
/// strips it.
#[derive(Debug)]
pub struct Unpadder {
    block_size: usize,
    state: State,
}

impl Unpadder {
    /// `block_size` is in bytes and must be in `1..=255`
    pub(crate) fn new(block_size: usize) -> Self {
        Self {
            block_size,
            state: State::Active(Vec::with_capacity(2 * block_size)),
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized)
    }
}

impl PaddingContext for Unpadder {
    fn update<'a>(&mut self, data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
        let buffer = self.state.buffer_mut()?;
        let data = data.into().bytes()?;

        buffer.extend_from_slice(data);
        let finished_blocks = (buffer.len() / self.block_size).saturating_sub(1);
        let out = emit_blocks(buffer, finished_blocks, self.block_size);

        log::trace!(
            "unpadder: emitted {} bytes, withholding {}",
            out.len(),
            buffer.len()
        );
        Ok(out)
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        let buffer = self.state.buffer_mut()?;

        let pad_size = match buffer.last() {
            Some(&last) => last as usize,
            None => return Err(PaddingError::InvalidPadding),
        };
        if pad_size == 0 || pad_size > self.block_size || pad_size > buffer.len() {
            return Err(PaddingError::InvalidPadding);
        }

        let window = &buffer[buffer.len() - pad_size..];
        if pad_bytes_mismatch(window, pad_size as u8) != 0 {
            return Err(PaddingError::InvalidPadding);
        }

        let mut buffer = self.state.take()?;
        buffer.truncate(buffer.len() - pad_size);

        log::debug!("unpadder: finalized, stripped {} pad bytes", pad_size);
        Ok(buffer)
    }
}

/// OR-accumulate `byte ^ pad_size` over the whole window.
///
/// Returns zero iff every byte equals `pad_size`. Never exits early, so the
/// running time depends only on the window length.
#[inline(never)]
pub fn pad_bytes_mismatch(window: &[u8], pad_size: u8) -> u8 {
    let mut mismatch = 0u8;
    for &b in window {
        mismatch |= b ^ pad_size;
    }
    std::hint::black_box(mismatch)
}
