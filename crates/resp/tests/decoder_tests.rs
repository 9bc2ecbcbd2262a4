//! Integration tests for the RESP decoder

use bytes::Bytes;
use resp::Decoder;
use resp::DecoderLimits;
use resp::ParseError;
use resp::RespError;
use resp::RespValue;
use rstest::rstest;

fn bulk(s: &str) -> RespValue {
	RespValue::BulkString(Bytes::copy_from_slice(s.as_bytes()))
}

async fn decode_err(input: &[u8]) -> ParseError {
	match resp::decode(input).await {
		Err(RespError::Parse(e)) => e,
		other => panic!("Expected parse error, got {:?}", other),
	}
}

#[tokio::test]
async fn test_decode_set_command() {
	let input = b"*3\r\n$3\r\nset\r\n$6\r\nleader\r\n$7\r\nCharlie\r\n";
	let value = resp::decode(input).await.unwrap();
	assert_eq!(
		value,
		RespValue::Array(vec![bulk("set"), bulk("leader"), bulk("Charlie")])
	);
}

#[tokio::test]
async fn test_decode_null_bulk_string() {
	let value = resp::decode(b"$-1\r\n").await.unwrap();
	assert_eq!(value, RespValue::NullBulkString);
}

#[tokio::test]
async fn test_decode_null_array() {
	let value = resp::decode(b"*-1\r\n").await.unwrap();
	assert_eq!(value, RespValue::NullArray);
}

#[tokio::test]
async fn test_decode_empty_bulk_string_is_not_null() {
	let value = resp::decode(b"$0\r\n\r\n").await.unwrap();
	assert_eq!(value, RespValue::BulkString(Bytes::new()));
}

#[tokio::test]
async fn test_decode_empty_array_is_not_null() {
	let value = resp::decode(b"*0\r\n").await.unwrap();
	assert_eq!(value, RespValue::Array(vec![]));
}

#[tokio::test]
async fn test_decode_nested_array() {
	let value = resp::decode(b"*1\r\n*2\r\n$1\r\na\r\n$1\r\nb\r\n")
		.await
		.unwrap();
	assert_eq!(
		value,
		RespValue::Array(vec![RespValue::Array(vec![bulk("a"), bulk("b")])])
	);
}

#[tokio::test]
async fn test_decode_mixed_array() {
	let input = b"*5\r\n+OK\r\n-ERR oops\r\n:-3\r\n$-1\r\n*-1\r\n";
	let value = resp::decode(input).await.unwrap();
	assert_eq!(
		value,
		RespValue::array([
			RespValue::simple_string("OK"),
			RespValue::error("ERR oops"),
			RespValue::integer(-3),
			RespValue::NullBulkString,
			RespValue::NullArray,
		])
	);
}

#[tokio::test]
async fn test_decode_binary_bulk_string() {
	let value = resp::decode(b"$4\r\n\r\n\0\xff\r\n").await.unwrap();
	assert_eq!(value, RespValue::BulkString(Bytes::from_static(b"\r\n\0\xff")));
}

#[tokio::test]
async fn test_decode_length_with_surrounding_whitespace() {
	let value = resp::decode(b"$ 3 \r\nfoo\r\n").await.unwrap();
	assert_eq!(value, bulk("foo"));
}

#[tokio::test]
async fn test_declared_length_longer_than_payload() {
	let err = decode_err(b"$3\r\nab\r\n").await;
	assert_eq!(err, ParseError::MissingBulkTerminator { declared: 3 });
}

#[tokio::test]
async fn test_declared_length_shorter_than_payload() {
	let err = decode_err(b"$2\r\nabc\r\n").await;
	assert_eq!(err, ParseError::MissingBulkTerminator { declared: 2 });
}

#[tokio::test]
async fn test_stream_ends_after_short_payload() {
	let err = decode_err(b"$5\r\nab\r\n").await;
	assert_eq!(
		err,
		ParseError::BulkLengthMismatch {
			declared: 5,
			actual: 2
		}
	);
}

#[rstest]
#[case(b":abc\r\n")]
#[case(b":\r\n")]
#[case(b":12a\r\n")]
#[case(b":+1\r\n")]
#[tokio::test]
async fn test_invalid_integer(#[case] input: &[u8]) {
	let err = decode_err(input).await;
	assert!(matches!(err, ParseError::InvalidInteger(_)), "got {:?}", err);
}

#[rstest]
#[case(b"$\r\n")]
#[case(b"*\r\n")]
#[case(b"$ \r\n")]
#[tokio::test]
async fn test_empty_length_prefix(#[case] input: &[u8]) {
	let err = decode_err(input).await;
	assert!(matches!(err, ParseError::InvalidFormat(_)), "got {:?}", err);
}

#[rstest]
#[case(b"$x\r\n")]
#[case(b"*1.5\r\n")]
#[tokio::test]
async fn test_non_numeric_length_prefix(#[case] input: &[u8]) {
	let err = decode_err(input).await;
	assert!(matches!(err, ParseError::InvalidInteger(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_negative_lengths_other_than_null() {
	assert_eq!(
		decode_err(b"$-2\r\n").await,
		ParseError::InvalidBulkStringLength(-2)
	);
	assert_eq!(
		decode_err(b"*-5\r\n").await,
		ParseError::InvalidArrayLength(-5)
	);
}

#[rstest]
#[case(b"+OK\n")]
#[case(b":1\n")]
#[case(b"$3\nfoo\r\n")]
#[case(b"+a\rb\r\n")]
#[case(b"-ERR a\rb\r\n")]
#[case(b"+\r\r\n")]
#[tokio::test]
async fn test_line_without_cr(#[case] input: &[u8]) {
	let err = decode_err(input).await;
	assert!(matches!(err, ParseError::InvalidFormat(_)), "got {:?}", err);
}

#[rstest]
#[case(b'?')]
#[case(b'#')]
#[case(b'_')]
#[case(0x00)]
#[tokio::test]
async fn test_unknown_type_marker(#[case] marker: u8) {
	let input = [marker, b'\r', b'\n'];
	assert_eq!(
		decode_err(&input).await,
		ParseError::InvalidTypeMarker(marker)
	);
}

#[tokio::test]
async fn test_empty_stream_is_closed() {
	let err = resp::decode(b"").await.unwrap_err();
	assert!(err.is_closed());
}

#[rstest]
#[case(b"+OK")]
#[case(b"$3\r\nfo")]
#[case(b"$3\r\nfoo")]
#[case(b"$3\r\nfoo\r")]
#[case(b"*2\r\n")]
#[case(b"*3\r\n$1\r\na\r\n$1\r\nb\r\n")]
#[case(b"*1\r\n*1\r\n")]
#[tokio::test]
async fn test_truncated_value(#[case] input: &[u8]) {
	assert_eq!(decode_err(input).await, ParseError::UnexpectedEOF);
}

#[tokio::test]
async fn test_successive_values() {
	let input: &[u8] = b"+OK\r\n:1\r\n$3\r\nfoo\r\n*1\r\n:2\r\n$-1\r\n";
	let mut decoder = Decoder::new(input);

	assert_eq!(
		decoder.read_value().await.unwrap(),
		RespValue::simple_string("OK")
	);
	assert_eq!(decoder.read_value().await.unwrap(), RespValue::integer(1));
	assert_eq!(decoder.read_value().await.unwrap(), bulk("foo"));
	assert_eq!(
		decoder.read_value().await.unwrap(),
		RespValue::array([RespValue::integer(2)])
	);
	assert_eq!(
		decoder.read_value().await.unwrap(),
		RespValue::NullBulkString
	);
	assert!(decoder.read_value().await.unwrap_err().is_closed());
}

#[tokio::test]
async fn test_value_does_not_consume_next_frame() {
	let input: &[u8] = b"$3\r\nfoo\r\n+NEXT\r\n";
	let mut decoder = Decoder::new(input);
	decoder.read_value().await.unwrap();
	assert_eq!(*decoder.get_ref(), b"+NEXT\r\n");
}

#[tokio::test]
async fn test_nesting_limit() {
	let limits = DecoderLimits::new().max_depth(2);

	let mut ok = Decoder::with_limits(&b"*1\r\n*1\r\n:1\r\n"[..], limits);
	assert_eq!(
		ok.read_value().await.unwrap(),
		RespValue::array([RespValue::array([RespValue::integer(1)])])
	);

	let mut too_deep = Decoder::with_limits(&b"*1\r\n*1\r\n*1\r\n:1\r\n"[..], limits);
	assert!(matches!(
		too_deep.read_value().await,
		Err(RespError::Parse(ParseError::NestingTooDeep(2)))
	));
}

#[tokio::test]
async fn test_deep_nesting_within_default_limit() {
	let depth = 100;
	let mut input = Vec::new();
	for _ in 0..depth {
		input.extend_from_slice(b"*1\r\n");
	}
	input.extend_from_slice(b":7\r\n");

	let mut expected = RespValue::integer(7);
	for _ in 0..depth {
		expected = RespValue::array([expected]);
	}
	assert_eq!(resp::decode(&input).await.unwrap(), expected);
}

#[tokio::test]
async fn test_bulk_and_array_limits() {
	let limits = DecoderLimits::new().max_bulk_len(4).max_array_len(2);

	let mut big_bulk = Decoder::with_limits(&b"$5\r\nhello\r\n"[..], limits);
	assert!(matches!(
		big_bulk.read_value().await,
		Err(RespError::Parse(ParseError::BulkStringTooLarge {
			declared: 5,
			max: 4
		}))
	));

	let mut big_array = Decoder::with_limits(&b"*3\r\n:1\r\n:2\r\n:3\r\n"[..], limits);
	assert!(matches!(
		big_array.read_value().await,
		Err(RespError::Parse(ParseError::ArrayTooLarge {
			declared: 3,
			max: 2
		}))
	));
}

#[tokio::test]
async fn test_huge_declared_array_fails_without_allocating() {
	let err = decode_err(b"*9223372036854775807\r\n").await;
	assert!(matches!(err, ParseError::ArrayTooLarge { .. }));
}
