use std::io;
use std::sync::Arc;
use std::time::Duration;

use resp::Decoder;
use resp::DecoderLimits;
use resp::EncodeError;
use resp::Encoder;
use resp::ParseError;
use resp::RespError;
use resp::RespValue;
use storage::Cache;
use tokio::io::AsyncRead;
use tokio::io::AsyncWrite;
use tokio::io::BufReader;
use tokio::io::BufWriter;
use tracing::debug;
use tracing::warn;

use crate::cmd::CmdTable;
use crate::cmd::ParsedCmd;

/// State shared by every connection of one server.
#[derive(Clone)]
pub struct SessionContext {
	pub cache: Arc<dyn Cache>,
	pub cmd_table: Arc<CmdTable>,
	pub limits: DecoderLimits,
	pub idle_timeout: Option<Duration>,
}

/// Serves one client: decode a request, execute it, encode the reply.
///
/// Replies to pipelined requests are buffered and flushed before the session
/// waits on the client, so a batch costs one write.
pub struct ClientSession<R, W> {
	decoder: Decoder<BufReader<R>>,
	encoder: Encoder<BufWriter<W>>,
	ctx: SessionContext,
}

impl<R, W> ClientSession<R, W>
where
	R: AsyncRead + Unpin,
	W: AsyncWrite + Unpin,
{
	pub fn new(reader: R, writer: W, ctx: SessionContext) -> Self {
		Self {
			decoder: Decoder::with_limits(BufReader::new(reader), ctx.limits),
			encoder: Encoder::new(BufWriter::new(writer)),
			ctx,
		}
	}

	/// Serve requests until the client disconnects.
	///
	/// A clean close or a reset by the peer ends the session with `Ok`. A
	/// malformed frame is answered with a protocol error before the session
	/// ends with the parse error. Replies already produced are flushed on
	/// every exit.
	pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		loop {
			let request = match self.read_request().await {
				Ok(value) => value,
				Err(RespError::Closed) => {
					debug!("Client closed connection");
					self.flush_pending().await;
					return Ok(());
				}
				Err(RespError::Io(e)) if is_disconnect(&e) => {
					debug!("Connection reset by peer");
					return Ok(());
				}
				Err(RespError::Parse(e)) => {
					self.reply_protocol_error(&e).await;
					return Err(e.into());
				}
				Err(e) => {
					self.flush_pending().await;
					return Err(e.into());
				}
			};

			let response = self.handle(request).await;
			match self.encoder.write_value(&response).await {
				Ok(()) => {}
				Err(EncodeError::Io(e)) if is_disconnect(&e) => {
					debug!("Connection reset by peer");
					return Ok(());
				}
				Err(e) => return Err(e.into()),
			}
		}
	}

	/// Decode the next request. Requests already buffered are served without
	/// flushing, so a pipelined batch is answered with one write; pending
	/// replies are flushed before waiting on the peer for more bytes.
	async fn read_request(&mut self) -> Result<RespValue, RespError> {
		let read = self.decoder.read_value();
		tokio::pin!(read);

		let buffered = tokio::select! {
			biased;
			result = &mut read => Some(result),
			_ = std::future::ready(()) => None,
		};
		if let Some(result) = buffered {
			return result;
		}

		self.encoder.flush().await.map_err(|e| match e {
			EncodeError::Io(e) => RespError::Io(e),
			other => RespError::Io(io::Error::other(other)),
		})?;

		match self.ctx.idle_timeout {
			Some(limit) => tokio::time::timeout(limit, read).await.map_err(|_| {
				RespError::Io(io::Error::new(
					io::ErrorKind::TimedOut,
					format!("client idle for more than {:?}", limit),
				))
			})?,
			None => read.await,
		}
	}

	async fn flush_pending(&mut self) {
		if let Err(e) = self.encoder.flush().await {
			debug!("Failed to flush pending replies: {}", e);
		}
	}

	/// Turn one decoded frame into its reply.
	pub async fn handle(&self, request: RespValue) -> RespValue {
		let parsed_cmd = match ParsedCmd::try_from(request) {
			Ok(cmd) => cmd,
			Err(e) => return RespValue::error(format!("ERR Protocol error: {}", e)),
		};

		debug!(
			command = %parsed_cmd.name,
			args = parsed_cmd.args.len(),
			"Executing command"
		);

		match self.ctx.cmd_table.get_cmd(&parsed_cmd.name) {
			Some(cmd) => cmd.execute(self.ctx.cache.as_ref(), &parsed_cmd.args).await,
			None => RespValue::error(sanitize(&format!(
				"ERR unknown command '{}'",
				parsed_cmd.name.to_lowercase()
			))),
		}
	}

	async fn reply_protocol_error(&mut self, err: &ParseError) {
		let message = sanitize(&format!("ERR Protocol error: {}", err));
		let result = match self.encoder.write_error(message).await {
			Ok(()) => self.encoder.flush().await,
			Err(e) => Err(e),
		};
		if let Err(e) = result {
			warn!("Failed to send protocol error reply: {}", e);
		}
	}
}

fn is_disconnect(err: &io::Error) -> bool {
	matches!(
		err.kind(),
		io::ErrorKind::ConnectionReset
			| io::ErrorKind::ConnectionAborted
			| io::ErrorKind::BrokenPipe
	)
}

// Error lines cannot carry CR or LF.
fn sanitize(message: &str) -> String {
	message.replace(['\r', '\n'], " ")
}
