use crate::error::Result;
use crate::scheme::Pkcs7;
use crate::stream::{pad_stream, DEFAULT_CHUNK_SIZE};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Options for the pad command
#[derive(Debug, Clone)]
pub struct PadOptions {
    pub scheme: Pkcs7,
    pub chunk_size: usize,
    /// Write the padded output hex-encoded
    pub hex: bool,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self {
            scheme: Pkcs7::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            hex: false,
        }
    }
}

/// Default output path for `pad`: the input with `.pad` appended
pub fn default_pad_output(input: &Path) -> PathBuf {
    let mut os = input.as_os_str().to_os_string();
    os.push(".pad");
    PathBuf::from(os)
}

/// Pad `input_path` into `output_path`
/// Returns the number of padded bytes (before any hex encoding)
pub fn pad_file(input_path: &Path, output_path: &Path, options: &PadOptions) -> Result<u64> {
    let reader = BufReader::new(File::open(input_path)?);
    let writer = BufWriter::new(File::create(output_path)?);

    if options.hex {
        let mut hex_writer = HexWriter(writer);
        let written = pad_stream(&options.scheme, reader, &mut hex_writer, options.chunk_size)?;
        hex_writer.0.write_all(b"\n")?;
        hex_writer.0.flush()?;
        Ok(written)
    } else {
        pad_stream(&options.scheme, reader, writer, options.chunk_size)
    }
}

/// Hex-encodes everything written through it
struct HexWriter<W: Write>(W);

impl<W: Write> Write for HexWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write_all(hex::encode(buf).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}
