//! Streaming RESP2 decoder over an async buffered byte source.
//!
//! The decoder reads exactly one top-level value per call and never looks
//! past the end of that value, so repeated calls on the same stream return
//! pipelined values in order. Nested arrays are assembled on an explicit
//! stack of pending frames instead of through recursion.

use bytes::Bytes;
use bytes::BytesMut;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;

use crate::error::ParseError;
use crate::error::RespError;
use crate::types::RespValue;
use crate::utils::*;

pub const DEFAULT_MAX_DEPTH: usize = 128;
/// Matches Redis `proto-max-bulk-len`.
pub const DEFAULT_MAX_BULK_LEN: usize = 512 * 1024 * 1024;
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1024 * 1024;
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Payload buffers are grown on demand past this size rather than trusting
/// the declared length for the initial allocation.
const MAX_PREALLOC: usize = 64 * 1024;

/// Initial element capacity of an array under construction. Every pending
/// level reserves at most this many slots, whatever its declared length.
const MAX_ARRAY_PREALLOC: usize = 64;

/// Resource limits applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderLimits {
	/// Maximum number of nested array levels; a top-level array is level 1.
	pub max_depth: usize,
	/// Maximum declared length of a bulk string.
	pub max_bulk_len: usize,
	/// Maximum declared element count of an array.
	pub max_array_len: usize,
	/// Maximum length of a CRLF-terminated line, excluding the CRLF.
	pub max_line_len: usize,
}

impl Default for DecoderLimits {
	fn default() -> Self {
		Self::new()
	}
}

impl DecoderLimits {
	pub const fn new() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			max_bulk_len: DEFAULT_MAX_BULK_LEN,
			max_array_len: DEFAULT_MAX_ARRAY_LEN,
			max_line_len: DEFAULT_MAX_LINE_LEN,
		}
	}

	pub const fn max_depth(mut self, depth: usize) -> Self {
		self.max_depth = depth;
		self
	}

	pub const fn max_bulk_len(mut self, len: usize) -> Self {
		self.max_bulk_len = len;
		self
	}

	pub const fn max_array_len(mut self, len: usize) -> Self {
		self.max_array_len = len;
		self
	}

	pub const fn max_line_len(mut self, len: usize) -> Self {
		self.max_line_len = len;
		self
	}
}

/// An array whose header has been read but whose elements are still arriving.
#[derive(Debug)]
struct PendingArray {
	expected: usize,
	elements: Vec<RespValue>,
}

impl PendingArray {
	fn new(expected: usize) -> Self {
		Self {
			expected,
			elements: Vec::with_capacity(expected.min(MAX_ARRAY_PREALLOC)),
		}
	}
}

enum Parsed {
	Value(RespValue),
	ArrayStart(usize),
}

/// Reads RESP2 values from a buffered async stream.
///
/// A decoder is owned by a single connection. Once `read_value` has returned
/// an error other than [`RespError::Closed`] the stream position is
/// undefined and the decoder should be dropped along with the connection.
#[derive(Debug)]
pub struct Decoder<R> {
	reader: R,
	limits: DecoderLimits,
	line: Vec<u8>,
}

impl<R> Decoder<R>
where
	R: AsyncBufRead + Unpin,
{
	pub fn new(reader: R) -> Self {
		Self::with_limits(reader, DecoderLimits::default())
	}

	pub fn with_limits(reader: R, limits: DecoderLimits) -> Self {
		Self {
			reader,
			limits,
			line: Vec::new(),
		}
	}

	pub fn limits(&self) -> &DecoderLimits {
		&self.limits
	}

	pub fn get_ref(&self) -> &R {
		&self.reader
	}

	pub fn get_mut(&mut self) -> &mut R {
		&mut self.reader
	}

	pub fn into_inner(self) -> R {
		self.reader
	}

	/// Read one complete top-level value.
	///
	/// Returns [`RespError::Closed`] if the stream ends before the first byte
	/// of the value, and [`ParseError::UnexpectedEOF`] if it ends part way
	/// through.
	pub async fn read_value(&mut self) -> Result<RespValue, RespError> {
		let mut marker = match self.read_byte().await? {
			Some(byte) => byte,
			None => return Err(RespError::Closed),
		};
		let mut frames: Vec<PendingArray> = Vec::new();

		loop {
			match self.read_frame(marker, frames.len()).await? {
				Parsed::ArrayStart(expected) => frames.push(PendingArray::new(expected)),
				Parsed::Value(value) => {
					if let Some(done) = complete_frames(&mut frames, value) {
						return Ok(done);
					}
				}
			}
			marker = self.expect_byte().await?;
		}
	}

	async fn read_frame(&mut self, marker: u8, depth: usize) -> Result<Parsed, RespError> {
		let value = match marker {
			SIMPLE_STRING => RespValue::SimpleString(self.read_text_line().await?),
			ERROR => RespValue::Error(self.read_text_line().await?),
			INTEGER => RespValue::Integer(parse_integer(self.read_line().await?)?),
			BULK_STRING => {
				let length = parse_length(self.read_line().await?)?;
				if length == NULL_LENGTH {
					RespValue::NullBulkString
				} else if length < NULL_LENGTH {
					return Err(ParseError::InvalidBulkStringLength(length).into());
				} else {
					let declared = length as usize;
					if declared > self.limits.max_bulk_len {
						return Err(ParseError::BulkStringTooLarge {
							declared,
							max: self.limits.max_bulk_len,
						}
						.into());
					}
					RespValue::BulkString(self.read_bulk(declared).await?)
				}
			}
			ARRAY => {
				let length = parse_length(self.read_line().await?)?;
				if length == NULL_LENGTH {
					RespValue::NullArray
				} else if length < NULL_LENGTH {
					return Err(ParseError::InvalidArrayLength(length).into());
				} else {
					let declared = length as usize;
					if declared > self.limits.max_array_len {
						return Err(ParseError::ArrayTooLarge {
							declared,
							max: self.limits.max_array_len,
						}
						.into());
					}
					if depth >= self.limits.max_depth {
						return Err(ParseError::NestingTooDeep(self.limits.max_depth).into());
					}
					if declared == 0 {
						RespValue::Array(Vec::new())
					} else {
						return Ok(Parsed::ArrayStart(declared));
					}
				}
			}
			_ => return Err(ParseError::InvalidTypeMarker(marker).into()),
		};
		Ok(Parsed::Value(value))
	}

	/// Read a CRLF-terminated line and return it without the terminator.
	async fn read_line(&mut self) -> Result<&[u8], RespError> {
		self.line.clear();
		// Room for the longest allowed line plus its CRLF.
		let limit = self.limits.max_line_len as u64 + 2;
		let n = (&mut self.reader)
			.take(limit)
			.read_until(b'\n', &mut self.line)
			.await?;

		if self.line.last() != Some(&b'\n') {
			if n as u64 == limit {
				return Err(ParseError::LineTooLong(self.limits.max_line_len).into());
			}
			return Err(ParseError::UnexpectedEOF.into());
		}
		Ok(strip_crlf(&self.line)?)
	}

	/// Read the body of a simple string or error, which cannot hold a line
	/// break of its own.
	async fn read_text_line(&mut self) -> Result<Bytes, RespError> {
		let line = self.read_line().await?;
		if has_line_break(line) {
			return Err(
				ParseError::InvalidFormat("line break inside simple string or error".into()).into(),
			);
		}
		Ok(Bytes::copy_from_slice(line))
	}

	/// Read exactly `declared` payload bytes followed by CRLF.
	async fn read_bulk(&mut self, declared: usize) -> Result<Bytes, RespError> {
		let mut payload = BytesMut::with_capacity(declared.min(MAX_PREALLOC));

		while payload.len() < declared {
			let available = self.reader.fill_buf().await?;
			if available.is_empty() {
				if payload.ends_with(CRLF) {
					return Err(ParseError::BulkLengthMismatch {
						declared,
						actual: payload.len() - CRLF.len(),
					}
					.into());
				}
				return Err(ParseError::UnexpectedEOF.into());
			}
			let take = available.len().min(declared - payload.len());
			payload.extend_from_slice(&available[..take]);
			self.reader.consume(take);
		}

		for &expected in CRLF {
			if self.expect_byte().await? != expected {
				return Err(ParseError::MissingBulkTerminator { declared }.into());
			}
		}
		Ok(payload.freeze())
	}

	async fn read_byte(&mut self) -> Result<Option<u8>, RespError> {
		let available = self.reader.fill_buf().await?;
		let Some(&byte) = available.first() else {
			return Ok(None);
		};
		self.reader.consume(1);
		Ok(Some(byte))
	}

	/// Like `read_byte`, but end of stream is a truncated value.
	async fn expect_byte(&mut self) -> Result<u8, RespError> {
		self.read_byte()
			.await?
			.ok_or(RespError::Parse(ParseError::UnexpectedEOF))
	}
}

/// Push a finished value into the innermost pending array, closing every
/// array that becomes full. Returns the top-level value once the stack is
/// empty.
fn complete_frames(frames: &mut Vec<PendingArray>, mut value: RespValue) -> Option<RespValue> {
	while let Some(top) = frames.last_mut() {
		top.elements.push(value);
		if top.elements.len() < top.expected {
			return None;
		}
		let elements = std::mem::take(&mut top.elements);
		frames.pop();
		value = RespValue::Array(elements);
	}
	Some(value)
}

/// Decode a single value from an in-memory buffer.
///
/// Trailing bytes after the first value are ignored.
pub async fn decode(buf: &[u8]) -> Result<RespValue, RespError> {
	Decoder::new(buf).read_value().await
}
