//! Blockpad - streaming PKCS#7 padding for block ciphers
//!
//! Converts arbitrary-length plaintext into a whole number of cipher blocks
//! and back, one increment at a time. Unpadding validates the pad bytes in
//! constant time and reports every malformed pad with the same error.
//!
//! ## Contexts
//!
//! ```text
//! Pkcs7(block bits) ──padder()──▶ Padder   update* → finalize
//!                   └─unpadder()─▶ Unpadder update* → finalize
//! ```
//!
//! - **Padder**: emits each block as soon as it is complete and holds back
//!   the partial tail; `finalize` appends 1..=block_size pad bytes.
//! - **Unpadder**: always withholds the last full block, since only
//!   `finalize` knows it is the one carrying the pad length.
//!
//! Neither context knows anything about ciphers, modes or transport.
//!
//! ## Example
//!
//! ```
//! use blockpad::{PaddingContext, Pkcs7};
//!
//! let scheme = Pkcs7::new(128).unwrap();
//!
//! let mut padder = scheme.padder();
//! let mut padded = padder.update(b"attack at dawn").unwrap();
//! padded.extend(padder.finalize().unwrap());
//! assert_eq!(padded.len(), 16);
//!
//! let mut unpadder = scheme.unpadder();
//! let mut message = unpadder.update(&padded).unwrap();
//! message.extend(unpadder.finalize().unwrap());
//! assert_eq!(message, b"attack at dawn");
//! ```

pub mod cli;
pub mod error;
pub mod padding;
pub mod scheme;
pub mod stream;

pub use error::{PaddingError, Result};
pub use padding::{Input, Padder, PaddingContext, Unpadder};
pub use scheme::Pkcs7;
pub use stream::{pad_stream, unpad_stream};
