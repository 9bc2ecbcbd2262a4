//! RESP2 encoding, both into memory (`RespEncoder`) and onto an async sink
//! (`Encoder`).

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;

use crate::error::EncodeError;
use crate::types::RespValue;
use crate::utils::*;

/// Trait for encoding RESP values into a buffer.
pub trait RespEncoder {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError>;

	fn encode(&self) -> Result<Bytes, EncodeError> {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf)?;
		Ok(buf.freeze())
	}
}

impl RespEncoder for RespValue {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
		match self {
			RespValue::SimpleString(s) => encode_line(buf, SIMPLE_STRING, s)?,
			RespValue::Error(e) => encode_line(buf, ERROR, e)?,
			RespValue::Integer(i) => encode_integer(buf, *i),
			RespValue::BulkString(s) => encode_bulk_string(buf, s),
			RespValue::NullBulkString => encode_null(buf, BULK_STRING),
			RespValue::Array(arr) => {
				encode_length(buf, ARRAY, arr.len());
				for value in arr {
					value.encode_to(buf)?;
				}
			}
			RespValue::NullArray => encode_null(buf, ARRAY),
		}
		Ok(())
	}
}

/// Simple strings and errors are not binary safe.
#[inline]
fn encode_line(buf: &mut BytesMut, marker: u8, s: &[u8]) -> Result<(), EncodeError> {
	if has_line_break(s) {
		return Err(EncodeError::InvalidValue(format!(
			"'{}' payload must not contain CR or LF",
			marker as char
		)));
	}
	buf.put_u8(marker);
	buf.put_slice(s);
	buf.put_slice(CRLF);
	Ok(())
}

#[inline]
fn encode_integer(buf: &mut BytesMut, i: i64) {
	buf.put_u8(INTEGER);
	buf.put_slice(i.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_length(buf: &mut BytesMut, marker: u8, length: usize) {
	buf.put_u8(marker);
	buf.put_slice(length.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_bulk_string(buf: &mut BytesMut, s: &[u8]) {
	encode_length(buf, BULK_STRING, s.len());
	buf.put_slice(s);
	buf.put_slice(CRLF);
}

#[inline]
fn encode_null(buf: &mut BytesMut, marker: u8) {
	buf.put_u8(marker);
	buf.put_slice(NULL_LENGTH.to_string().as_bytes());
	buf.put_slice(CRLF);
}

/// Writes RESP2 frames to an async sink.
///
/// Every method writes one complete frame before returning. Arrays are
/// streamed: `write_array_header` emits only `*N\r\n` and the caller writes
/// the `N` elements with further calls. Call `flush` when the sink is
/// buffered.
#[derive(Debug)]
pub struct Encoder<W> {
	writer: W,
	scratch: BytesMut,
}

impl<W> Encoder<W>
where
	W: AsyncWrite + Unpin,
{
	pub fn new(writer: W) -> Self {
		Self {
			writer,
			scratch: BytesMut::with_capacity(64),
		}
	}

	pub fn get_ref(&self) -> &W {
		&self.writer
	}

	pub fn get_mut(&mut self) -> &mut W {
		&mut self.writer
	}

	pub fn into_inner(self) -> W {
		self.writer
	}

	pub async fn write_simple_string(&mut self, s: impl AsRef<[u8]>) -> Result<(), EncodeError> {
		self.scratch.clear();
		encode_line(&mut self.scratch, SIMPLE_STRING, s.as_ref())?;
		self.send_scratch().await
	}

	pub async fn write_error(&mut self, message: impl AsRef<[u8]>) -> Result<(), EncodeError> {
		self.scratch.clear();
		encode_line(&mut self.scratch, ERROR, message.as_ref())?;
		self.send_scratch().await
	}

	pub async fn write_integer(&mut self, i: i64) -> Result<(), EncodeError> {
		self.scratch.clear();
		encode_integer(&mut self.scratch, i);
		self.send_scratch().await
	}

	/// Write a bulk string. The payload is copied to the sink as is, so it
	/// may contain any bytes.
	pub async fn write_bulk_string(&mut self, payload: impl AsRef<[u8]>) -> Result<(), EncodeError> {
		let payload = payload.as_ref();
		self.scratch.clear();
		encode_length(&mut self.scratch, BULK_STRING, payload.len());
		self.writer.write_all(&self.scratch).await?;
		self.writer.write_all(payload).await?;
		self.writer.write_all(CRLF).await?;
		Ok(())
	}

	/// Write the null bulk string `$-1\r\n`.
	pub async fn write_null(&mut self) -> Result<(), EncodeError> {
		self.scratch.clear();
		encode_null(&mut self.scratch, BULK_STRING);
		self.send_scratch().await
	}

	/// Write the null array `*-1\r\n`.
	pub async fn write_null_array(&mut self) -> Result<(), EncodeError> {
		self.scratch.clear();
		encode_null(&mut self.scratch, ARRAY);
		self.send_scratch().await
	}

	pub async fn write_array_header(&mut self, len: usize) -> Result<(), EncodeError> {
		self.scratch.clear();
		encode_length(&mut self.scratch, ARRAY, len);
		self.send_scratch().await
	}

	/// Write a whole value, including every element of an array.
	pub async fn write_value(&mut self, value: &RespValue) -> Result<(), EncodeError> {
		self.scratch.clear();
		value.encode_to(&mut self.scratch)?;
		self.send_scratch().await
	}

	pub async fn flush(&mut self) -> Result<(), EncodeError> {
		self.writer.flush().await?;
		Ok(())
	}

	async fn send_scratch(&mut self) -> Result<(), EncodeError> {
		self.writer.write_all(&self.scratch).await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_encode_simple_string() {
		let val = RespValue::SimpleString(Bytes::from_static(b"OK"));
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, b"+OK\r\n".as_slice());
	}

	#[test]
	fn test_encode_error() {
		let val = RespValue::Error(Bytes::from_static(b"ERR"));
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, b"-ERR\r\n".as_slice());
	}

	#[rstest]
	#[case(100, b":100\r\n")]
	#[case(-100, b":-100\r\n")]
	#[case(0, b":0\r\n")]
	fn test_encode_integer(#[case] input: i64, #[case] expected: &[u8]) {
		let val = RespValue::Integer(input);
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, expected);
	}

	#[test]
	fn test_encode_bulk_string() {
		let val = RespValue::BulkString(Bytes::from_static(b"hello"));
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, b"$5\r\nhello\r\n".as_slice());
	}

	#[test]
	fn test_encode_bulk_string_empty() {
		let val = RespValue::BulkString(Bytes::new());
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, b"$0\r\n\r\n".as_slice());
	}

	#[test]
	fn test_encode_nulls() {
		assert_eq!(
			RespValue::NullBulkString.encode().unwrap(),
			b"$-1\r\n".as_slice()
		);
		assert_eq!(RespValue::NullArray.encode().unwrap(), b"*-1\r\n".as_slice());
	}

	#[test]
	fn test_encode_array() {
		let val = RespValue::Array(vec![
			RespValue::SimpleString(Bytes::from_static(b"hello")),
			RespValue::Integer(42),
		]);
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, b"*2\r\n+hello\r\n:42\r\n".as_slice());
	}

	#[test]
	fn test_encode_array_empty() {
		let val = RespValue::Array(vec![]);
		let encoded = val.encode().unwrap();
		assert_eq!(encoded, b"*0\r\n".as_slice());
	}

	#[rstest]
	#[case(RespValue::simple_string("a\r\nb"))]
	#[case(RespValue::error("ERR\n"))]
	#[case(RespValue::array([RespValue::simple_string("x\ry")]))]
	fn test_encode_rejects_line_breaks(#[case] value: RespValue) {
		assert!(matches!(value.encode(), Err(EncodeError::InvalidValue(_))));
	}

	#[tokio::test]
	async fn test_encoder_writes_frames() {
		let mut encoder = Encoder::new(Vec::new());
		encoder.write_simple_string("OK").await.unwrap();
		encoder.write_error("ERR bad").await.unwrap();
		encoder.write_integer(-7).await.unwrap();
		encoder.write_bulk_string(b"a\r\nb").await.unwrap();
		encoder.write_null().await.unwrap();
		encoder.write_null_array().await.unwrap();
		encoder.write_array_header(2).await.unwrap();
		encoder.flush().await.unwrap();

		assert_eq!(
			encoder.into_inner(),
			b"+OK\r\n-ERR bad\r\n:-7\r\n$4\r\na\r\nb\r\n$-1\r\n*-1\r\n*2\r\n".to_vec()
		);
	}

	#[tokio::test]
	async fn test_encoder_rejects_before_writing() {
		let mut encoder = Encoder::new(Vec::new());
		let err = encoder.write_simple_string("bad\r\n").await.unwrap_err();
		assert!(matches!(err, EncodeError::InvalidValue(_)));
		assert!(encoder.get_ref().is_empty());
	}
}
