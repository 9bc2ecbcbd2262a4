//! RESP data types and value representation.

use bytes::Bytes;

/// Represents a RESP2 protocol value.
///
/// The null sentinels of bulk strings and arrays are variants of their own,
/// so a null can never carry a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RespValue {
	/// Simple string: `+OK\r\n`
	SimpleString(Bytes),

	/// Error: `-ERR message\r\n`
	Error(Bytes),

	/// Integer: `:1000\r\n`
	Integer(i64),

	/// Bulk string: `$6\r\nfoobar\r\n`
	BulkString(Bytes),

	/// Null bulk string: `$-1\r\n`
	NullBulkString,

	/// Array: `*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n`
	Array(Vec<RespValue>),

	/// Null array: `*-1\r\n`
	NullArray,
}

impl RespValue {
	/// Check if the value is an error
	pub fn is_error(&self) -> bool {
		matches!(self, RespValue::Error(_))
	}

	/// Check if the value is either null sentinel
	pub fn is_null(&self) -> bool {
		matches!(self, RespValue::NullBulkString | RespValue::NullArray)
	}

	/// Name of the value kind, for logs and error replies
	pub fn kind(&self) -> &'static str {
		match self {
			RespValue::SimpleString(_) => "simple string",
			RespValue::Error(_) => "error",
			RespValue::Integer(_) => "integer",
			RespValue::BulkString(_) => "bulk string",
			RespValue::NullBulkString => "null bulk string",
			RespValue::Array(_) => "array",
			RespValue::NullArray => "null array",
		}
	}

	/// Try to convert to a string slice
	pub fn as_str(&self) -> Option<&str> {
		match self {
			RespValue::SimpleString(s) | RespValue::BulkString(s) => std::str::from_utf8(s).ok(),
			_ => None,
		}
	}

	/// Try to convert to bytes
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			RespValue::SimpleString(b) | RespValue::BulkString(b) => Some(b),
			_ => None,
		}
	}

	/// Try to convert to integer
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			RespValue::Integer(i) => Some(*i),
			_ => None,
		}
	}

	/// Try to convert to array
	pub fn as_array(&self) -> Option<&[RespValue]> {
		match self {
			RespValue::Array(a) => Some(a),
			_ => None,
		}
	}

	/// Convert to String with lossy UTF-8 conversion
	pub fn to_string_lossy(&self) -> Option<String> {
		match self {
			RespValue::SimpleString(s) | RespValue::BulkString(s) | RespValue::Error(s) => {
				Some(String::from_utf8_lossy(s).into_owned())
			}
			_ => None,
		}
	}

	/// Try to consume and convert to Vec<RespValue>
	pub fn into_vec(self) -> Option<Vec<RespValue>> {
		match self {
			RespValue::Array(a) => Some(a),
			_ => None,
		}
	}

	// Convenience constructors

	/// Create a simple string value
	pub fn simple_string(s: impl Into<Bytes>) -> Self {
		RespValue::SimpleString(s.into())
	}

	/// Create a bulk string value
	pub fn bulk_string(s: impl Into<Bytes>) -> Self {
		RespValue::BulkString(s.into())
	}

	/// Create an error value
	pub fn error(e: impl Into<Bytes>) -> Self {
		RespValue::Error(e.into())
	}

	/// Create an integer value
	pub fn integer(i: i64) -> Self {
		RespValue::Integer(i)
	}

	/// Create an array value from an iterator
	pub fn array(items: impl IntoIterator<Item = RespValue>) -> Self {
		RespValue::Array(items.into_iter().collect())
	}

	/// Create a null bulk string
	pub fn null() -> Self {
		RespValue::NullBulkString
	}

	/// Create a null array
	pub fn null_array() -> Self {
		RespValue::NullArray
	}
}

impl From<&str> for RespValue {
	fn from(s: &str) -> Self {
		RespValue::BulkString(Bytes::copy_from_slice(s.as_bytes()))
	}
}

impl From<String> for RespValue {
	fn from(s: String) -> Self {
		RespValue::BulkString(Bytes::from(s))
	}
}

impl From<&[u8]> for RespValue {
	fn from(b: &[u8]) -> Self {
		RespValue::BulkString(Bytes::copy_from_slice(b))
	}
}

impl From<Bytes> for RespValue {
	fn from(b: Bytes) -> Self {
		RespValue::BulkString(b)
	}
}

impl From<i64> for RespValue {
	fn from(i: i64) -> Self {
		RespValue::Integer(i)
	}
}

impl<T: Into<RespValue>> From<Option<T>> for RespValue {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => RespValue::NullBulkString,
		}
	}
}
