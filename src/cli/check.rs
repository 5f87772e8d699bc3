use crate::error::Result;
use crate::padding::PaddingContext;
use crate::scheme::Pkcs7;
use crate::stream::DEFAULT_CHUNK_SIZE;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub scheme: Pkcs7,
    /// Include the final block, hex-encoded
    pub hex: bool,
    /// Render the report as JSON
    pub json: bool,
}

/// Result of validating a padded file
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub block_size_bits: usize,
    pub padded_bytes: u64,
    pub message_bytes: u64,
    pub pad_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_block: Option<String>,
}

impl CheckReport {
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(format!("{}\n", serde_json::to_string_pretty(self)?));
        }

        let mut output = String::new();
        output.push_str("Padding OK\n");
        output.push_str(&format!("  Block size: {} bits\n", self.block_size_bits));
        output.push_str(&format!("  Padded length: {} bytes\n", self.padded_bytes));
        output.push_str(&format!("  Message length: {} bytes\n", self.message_bytes));
        output.push_str(&format!("  Pad length: {} bytes\n", self.pad_bytes));
        if let Some(block) = &self.final_block {
            output.push_str(&format!("  Final block: {}\n", block));
        }
        Ok(output)
    }
}

/// Validate the padding of a file without writing the unpadded data
pub fn check_file(path: &Path, options: &CheckOptions) -> Result<CheckReport> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut unpadder = options.scheme.unpadder();
    let block_size = options.scheme.block_size_bytes();

    let mut chunk = vec![0u8; DEFAULT_CHUNK_SIZE];
    let mut padded_bytes = 0u64;
    let mut message_bytes = 0u64;
    // Last `block_size` bytes seen, for the hex dump
    let mut last_block: Vec<u8> = Vec::with_capacity(2 * block_size);

    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        padded_bytes += n as u64;
        message_bytes += unpadder.update(&chunk[..n])?.len() as u64;

        if options.hex {
            last_block.extend_from_slice(&chunk[..n]);
            let excess = last_block.len().saturating_sub(block_size);
            last_block.drain(..excess);
        }
    }

    message_bytes += unpadder.finalize()?.len() as u64;

    Ok(CheckReport {
        block_size_bits: options.scheme.block_size_bits(),
        padded_bytes,
        message_bytes,
        pad_bytes: padded_bytes - message_bytes,
        final_block: options.hex.then(|| hex::encode(&last_block)),
    })
}
