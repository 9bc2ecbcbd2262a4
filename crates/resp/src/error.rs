//! Error types for RESP decoding and encoding.

use thiserror::Error;

/// Error returned by [`Decoder::read_value`](crate::Decoder::read_value).
#[derive(Error, Debug)]
pub enum RespError {
	/// The stream ended cleanly before the first byte of a new value.
	#[error("Connection closed")]
	Closed,

	/// The peer sent bytes that do not form a valid RESP2 frame.
	#[error("Parse error: {0}")]
	Parse(#[from] ParseError),

	/// The underlying stream failed (reset, timeout, ...).
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl RespError {
	/// Returns true for a normal disconnect at a value boundary.
	pub fn is_closed(&self) -> bool {
		matches!(self, RespError::Closed)
	}
}

/// Malformed-frame errors. None of them can be recovered from on the same
/// stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
	/// The stream ended in the middle of a value
	#[error("Unexpected end of input")]
	UnexpectedEOF,

	/// Invalid type marker encountered
	#[error("Invalid type marker: {}", describe_byte(.0))]
	InvalidTypeMarker(u8),

	/// Invalid framing for the current type
	#[error("Invalid format: {0}")]
	InvalidFormat(String),

	/// Invalid integer value
	#[error("Invalid integer: {0}")]
	InvalidInteger(String),

	/// Negative bulk string length other than the -1 null sentinel
	#[error("Invalid bulk string length: {0}")]
	InvalidBulkStringLength(i64),

	/// Negative array length other than the -1 null sentinel
	#[error("Invalid array length: {0}")]
	InvalidArrayLength(i64),

	/// The stream ended after a CRLF found inside a bulk payload
	#[error("Bulk string length mismatch: declared {declared}, got {actual}")]
	BulkLengthMismatch { declared: usize, actual: usize },

	/// The bytes following the declared payload are not CRLF
	#[error("Bulk string of declared length {declared} is not terminated by CRLF")]
	MissingBulkTerminator { declared: usize },

	#[error("Bulk string length {declared} exceeds limit {max}")]
	BulkStringTooLarge { declared: usize, max: usize },

	#[error("Array length {declared} exceeds limit {max}")]
	ArrayTooLarge { declared: usize, max: usize },

	#[error("Line exceeds maximum length of {0} bytes")]
	LineTooLong(usize),

	#[error("Nesting depth exceeds limit {0}")]
	NestingTooDeep(usize),

	/// UTF-8 conversion error
	#[error("UTF-8 error: {0}")]
	Utf8Error(String),
}

impl From<std::str::Utf8Error> for ParseError {
	fn from(e: std::str::Utf8Error) -> Self {
		ParseError::Utf8Error(e.to_string())
	}
}

/// Errors that can occur during RESP encoding.
#[derive(Error, Debug)]
pub enum EncodeError {
	/// Value cannot be represented in its frame (e.g. CRLF in a simple string)
	#[error("Invalid value: {0}")]
	InvalidValue(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

fn describe_byte(byte: &u8) -> String {
	if byte.is_ascii_graphic() {
		format!("'{}'", *byte as char)
	} else {
		format!("0x{:02X}", byte)
	}
}
