use super::{emit_blocks, Input, PaddingContext, State};
use crate::error::Result;

/// Streaming PKCS#7 padder
///
/// Emits whole blocks as soon as they are complete and holds back the partial
/// tail (always shorter than one block) until [`PaddingContext::finalize`].
#[derive(Debug)]
pub struct Padder {
    block_size: usize,
    state: State,
}

impl Padder {
    /// `block_size` is in bytes and must be in `1..=255`
    pub(crate) fn new(block_size: usize) -> Self {
        Self {
            block_size,
            state: State::Active(Vec::with_capacity(block_size)),
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized)
    }
}

impl PaddingContext for Padder {
    fn update<'a>(&mut self, data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
        let buffer = self.state.buffer_mut()?;
        let data = data.into().bytes()?;

        buffer.extend_from_slice(data);
        let finished_blocks = buffer.len() / self.block_size;
        let out = emit_blocks(buffer, finished_blocks, self.block_size);

        log::trace!(
            "padder: emitted {} bytes, holding {}",
            out.len(),
            buffer.len()
        );
        Ok(out)
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        let mut buffer = self.state.take()?;

        // buffer.len() < block_size, so pad_size is in 1..=block_size
        let pad_size = self.block_size - buffer.len();
        buffer.resize(self.block_size, pad_size as u8);

        log::debug!("padder: finalized with {} pad bytes", pad_size);
        Ok(buffer)
    }
}
