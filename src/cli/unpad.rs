use crate::error::Result;
use crate::scheme::Pkcs7;
use crate::stream::{unpad_stream, DEFAULT_CHUNK_SIZE};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::{Path, PathBuf};

/// Options for the unpad command
#[derive(Debug, Clone)]
pub struct UnpadOptions {
    pub scheme: Pkcs7,
    pub chunk_size: usize,
    /// Input is hex-encoded
    pub hex: bool,
}

impl Default for UnpadOptions {
    fn default() -> Self {
        Self {
            scheme: Pkcs7::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            hex: false,
        }
    }
}

/// Default output path for `unpad`: strips a trailing `.pad`, otherwise appends `.out`
pub fn default_unpad_output(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == "pad" => input.with_extension(""),
        _ => {
            let mut os = input.as_os_str().to_os_string();
            os.push(".out");
            PathBuf::from(os)
        }
    }
}

/// Strip padding from `input_path` into `output_path`
/// Returns the number of bytes written
///
/// If the padding is invalid, the output file is removed.
pub fn unpad_file(input_path: &Path, output_path: &Path, options: &UnpadOptions) -> Result<u64> {
    let result = if options.hex {
        let text = std::fs::read_to_string(input_path)?;
        let bytes = hex::decode(text.trim())?;
        let writer = BufWriter::new(File::create(output_path)?);
        unpad_stream(&options.scheme, Cursor::new(bytes), writer, options.chunk_size)
    } else {
        let reader = BufReader::new(File::open(input_path)?);
        let writer = BufWriter::new(File::create(output_path)?);
        unpad_stream(&options.scheme, reader, writer, options.chunk_size)
    };

    if result.is_err() && output_path.exists() {
        std::fs::remove_file(output_path)?;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaddingError;
    use tempfile::tempdir;

    #[test]
    fn test_unpad_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("msg.pad");
        let output = dir.path().join("msg");
        let mut padded = b"ExactBlk".to_vec();
        padded.extend_from_slice(&[8u8; 8]);
        std::fs::write(&input, &padded).unwrap();

        let opts = UnpadOptions {
            scheme: Pkcs7::new(64).unwrap(),
            chunk_size: 3,
            ..Default::default()
        };
        assert_eq!(unpad_file(&input, &output, &opts).unwrap(), 8);
        assert_eq!(std::fs::read(&output).unwrap(), b"ExactBlk".to_vec());
    }

    #[test]
    fn test_unpad_file_hex() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("msg.hex");
        let output = dir.path().join("msg.bin");
        std::fs::write(&input, "68690202\n").unwrap();

        let opts = UnpadOptions {
            scheme: Pkcs7::new(32).unwrap(),
            hex: true,
            ..Default::default()
        };
        unpad_file(&input, &output, &opts).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"hi".to_vec());
    }

    #[test]
    fn test_bad_hex_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("msg.hex");
        let output = dir.path().join("msg.bin");
        std::fs::write(&input, "zz").unwrap();

        let opts = UnpadOptions {
            hex: true,
            ..Default::default()
        };
        assert!(matches!(
            unpad_file(&input, &output, &opts),
            Err(PaddingError::Hex(_))
        ));
    }

    #[test]
    fn test_invalid_padding_removes_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.pad");
        let output = dir.path().join("bad");
        std::fs::write(&input, [1u8, 2, 3, 4, 5, 6, 7, 9]).unwrap();

        let opts = UnpadOptions {
            scheme: Pkcs7::new(64).unwrap(),
            ..Default::default()
        };
        assert!(matches!(
            unpad_file(&input, &output, &opts),
            Err(PaddingError::InvalidPadding)
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_default_unpad_output() {
        assert_eq!(
            default_unpad_output(Path::new("data.bin.pad")),
            PathBuf::from("data.bin")
        );
        assert_eq!(
            default_unpad_output(Path::new("data.bin")),
            PathBuf::from("data.bin.out")
        );
    }
}
