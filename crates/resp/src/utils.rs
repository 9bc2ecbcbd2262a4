//! Frame validation helpers and constants shared by the decoder and encoder.

use crate::error::ParseError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Type markers for RESP2
pub const SIMPLE_STRING: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Length prefix marking a null bulk string or null array
pub const NULL_LENGTH: i64 = -1;

/// Strip the CRLF terminator from a line read up to (and including) `\n`.
///
/// A bare `\n` terminator is a framing error.
#[inline]
pub fn strip_crlf(line: &[u8]) -> Result<&[u8], ParseError> {
	line.strip_suffix(CRLF)
		.ok_or_else(|| ParseError::InvalidFormat("line is not terminated by CRLF".to_string()))
}

/// Parse a base-10 signed integer.
///
/// Accepts an optional leading `-`; rejects `+`, whitespace and empty input.
#[inline]
pub fn parse_integer(buf: &[u8]) -> Result<i64, ParseError> {
	let s = std::str::from_utf8(buf)?;
	if s.starts_with('+') {
		return Err(ParseError::InvalidInteger(s.to_string()));
	}
	s.parse::<i64>()
		.map_err(|e| ParseError::InvalidInteger(format!("{:?}: {}", s, e)))
}

/// Parse the length prefix of a bulk string or array.
///
/// The line must be non-empty and must not consist only of whitespace.
/// Surrounding ASCII whitespace is ignored.
#[inline]
pub fn parse_length(line: &[u8]) -> Result<i64, ParseError> {
	let trimmed = line.trim_ascii();
	if trimmed.is_empty() {
		return Err(ParseError::InvalidFormat("empty length prefix".to_string()));
	}
	parse_integer(trimmed)
}

/// Check whether a payload can be framed as a simple string or error.
#[inline]
pub fn has_line_break(buf: &[u8]) -> bool {
	memchr::memchr2(b'\r', b'\n', buf).is_some()
}
