//! # RESP - Redis Serialization Protocol Library
//!
//! A streaming RESP2 decoder and encoder built on tokio's async I/O traits.
//!
//! - [`Decoder`] reads one complete value per call from any
//!   [`AsyncBufRead`](tokio::io::AsyncBufRead), validating every frame
//!   (declared lengths, CRLF terminators, type markers).
//! - [`Encoder`] writes frames to any [`AsyncWrite`](tokio::io::AsyncWrite),
//!   including streamed arrays (`write_array_header` followed by elements).
//! - [`RespEncoder`] encodes a [`RespValue`] into memory.
//!
//! ## Example
//!
//! ```rust
//! use resp::{Decoder, Encoder, RespValue};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.write_array_header(2).await?;
//! encoder.write_bulk_string("GET").await?;
//! encoder.write_bulk_string("key").await?;
//! let wire = encoder.into_inner();
//!
//! let mut decoder = Decoder::new(&wire[..]);
//! let request = decoder.read_value().await?;
//! assert_eq!(
//! 	request,
//! 	RespValue::array([RespValue::bulk_string("GET"), RespValue::bulk_string("key")])
//! );
//! # Ok(())
//! # }
//! ```

mod decoder;
mod encoder;
mod error;
mod types;
mod utils;

pub use decoder::DEFAULT_MAX_ARRAY_LEN;
pub use decoder::DEFAULT_MAX_BULK_LEN;
pub use decoder::DEFAULT_MAX_DEPTH;
pub use decoder::DEFAULT_MAX_LINE_LEN;
pub use decoder::Decoder;
pub use decoder::DecoderLimits;
pub use decoder::decode;
pub use encoder::Encoder;
pub use encoder::RespEncoder;
pub use error::EncodeError;
pub use error::ParseError;
pub use error::RespError;
pub use types::RespValue;
