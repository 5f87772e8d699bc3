use crate::error::{PaddingError, Result};
use crate::padding::PaddingContext;
use crate::scheme::Pkcs7;
use std::io::{ErrorKind, Read, Write};

/// Default read size for the stream adapters
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Pad everything from `reader` into `writer`.
/// Returns the number of bytes written.
pub fn pad_stream<R: Read, W: Write>(
    scheme: &Pkcs7,
    reader: R,
    writer: W,
    chunk_size: usize,
) -> Result<u64> {
    let mut padder = scheme.padder();
    run(&mut padder, reader, writer, chunk_size)
}

/// Unpad everything from `reader` into `writer`.
/// Returns the number of bytes written. On invalid padding the writer has
/// already received every block except the final one.
pub fn unpad_stream<R: Read, W: Write>(
    scheme: &Pkcs7,
    reader: R,
    writer: W,
    chunk_size: usize,
) -> Result<u64> {
    let mut unpadder = scheme.unpadder();
    run(&mut unpadder, reader, writer, chunk_size)
}

fn run<C: PaddingContext, R: Read, W: Write>(
    context: &mut C,
    mut reader: R,
    mut writer: W,
    chunk_size: usize,
) -> Result<u64> {
    if chunk_size == 0 {
        return Err(PaddingError::InvalidParameter(
            "chunk size must be at least 1 byte".into(),
        ));
    }

    let mut chunk = vec![0u8; chunk_size];
    let mut written = 0u64;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        let out = context.update(&chunk[..n])?;
        writer.write_all(&out)?;
        written += out.len() as u64;
    }

    let tail = context.finalize()?;
    writer.write_all(&tail)?;
    writer.flush()?;
    written += tail.len() as u64;

    log::debug!("stream: wrote {} bytes", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pad_unpad_stream_roundtrip() {
        let scheme = Pkcs7::new(128).unwrap();
        let original: Vec<u8> = (0..1000).map(|i| (i % 251) as u8).collect();

        let mut padded = Vec::new();
        let n = pad_stream(&scheme, Cursor::new(&original), &mut padded, 7).unwrap();
        assert_eq!(n as usize, padded.len());
        assert_eq!(padded.len(), scheme.padded_len(original.len()));

        let mut restored = Vec::new();
        unpad_stream(&scheme, Cursor::new(&padded), &mut restored, 33).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_empty_stream() {
        let scheme = Pkcs7::new(64).unwrap();
        let mut padded = Vec::new();
        pad_stream(&scheme, Cursor::new(Vec::new()), &mut padded, 16).unwrap();
        assert_eq!(padded, vec![8u8; 8]);

        let mut restored = Vec::new();
        assert!(matches!(
            unpad_stream(&scheme, Cursor::new(Vec::new()), &mut restored, 16),
            Err(PaddingError::InvalidPadding)
        ));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let scheme = Pkcs7::default();
        let mut out = Vec::new();
        assert!(matches!(
            pad_stream(&scheme, Cursor::new(vec![1u8]), &mut out, 0),
            Err(PaddingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_corrupt_stream_emits_all_but_last_block() {
        let scheme = Pkcs7::new(32).unwrap();
        let mut padded = scheme.pad(b"0123456789").unwrap();
        let last = padded.len() - 1;
        padded[last] ^= 0x80;

        let mut restored = Vec::new();
        let result = unpad_stream(&scheme, Cursor::new(&padded), &mut restored, 4);
        assert!(matches!(result, Err(PaddingError::InvalidPadding)));
        assert_eq!(restored, b"01234567".to_vec());
    }
}
