use resp::Decoder;
use resp::RespError;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() {
	println!("--- RESP Streaming Decode Example ---");

	// Simulate a TCP stream with fragmented data
	// We are sending:
	// - A Simple String: "+OK\r\n"
	// - An Integer: ":1000\r\n"
	// - An Array: "*2\r\n$3\r\nSET\r\n$3\r\nkey\r\n"
	// - But split into random chunks.
	let data_chunks = vec![
		b"+O".as_slice(),
		b"K\r\n:1".as_slice(),
		b"00".as_slice(),
		b"0\r\n*2\r\n$3\r\nSE".as_slice(),
		b"T\r\n$3\r\nk".as_slice(),
		b"ey\r\n".as_slice(),
	];

	let (mut tx, rx) = tokio::io::duplex(64);
	tokio::spawn(async move {
		for (i, chunk) in data_chunks.into_iter().enumerate() {
			println!("\n[Stream] Sending Chunk {}: {:?}", i, String::from_utf8_lossy(chunk));
			if tx.write_all(chunk).await.is_err() {
				return;
			}
			tokio::task::yield_now().await;
		}
	});

	let mut decoder = Decoder::new(BufReader::new(rx));
	loop {
		match decoder.read_value().await {
			Ok(value) => println!("[Decoder] Complete: {:?}", value),
			Err(RespError::Closed) => {
				println!("[Decoder] Stream closed");
				break;
			}
			Err(e) => {
				eprintln!("[Decoder] Error: {}", e);
				break;
			}
		}
	}
}
