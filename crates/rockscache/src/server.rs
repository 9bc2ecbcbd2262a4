use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use storage::Cache;
use storage::MemoryCache;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::client::ClientSession;
use crate::client::SessionContext;
use crate::cmd::CmdTable;
use crate::config::ServerConfig;

pub struct Server {
	listener: TcpListener,
	ctx: SessionContext,
}

impl Server {
	/// Bind the listen socket and build the in-memory cache described by
	/// `config`.
	pub async fn bind(
		config: &ServerConfig,
	) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
		let cache: Arc<dyn Cache> = Arc::new(MemoryCache::with_max_keys(config.max_keys));
		Self::bind_with_cache(config, cache).await
	}

	pub async fn bind_with_cache(
		config: &ServerConfig,
		cache: Arc<dyn Cache>,
	) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
		let listener = TcpListener::bind(config.addr()).await?;
		let ctx = SessionContext {
			cache,
			cmd_table: Arc::new(CmdTable::new()),
			limits: config.decoder_limits(),
			idle_timeout: config.idle_timeout(),
		};
		Ok(Self { listener, ctx })
	}

	pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
		self.listener.local_addr()
	}

	/// Accept connections until the process is stopped.
	pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		self.run_with_shutdown(std::future::pending()).await
	}

	/// Accept connections until `shutdown` resolves. Sessions already
	/// running are left to finish on their own.
	pub async fn run_with_shutdown<F>(
		self,
		shutdown: F,
	) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
	where
		F: Future<Output = ()>,
	{
		info!("rockscache server listening on {}", self.local_addr()?);
		tokio::pin!(shutdown);

		loop {
			tokio::select! {
				_ = &mut shutdown => {
					info!("Shutdown signal received, no longer accepting connections");
					return Ok(());
				}
				accepted = self.listener.accept() => match accepted {
					Ok((socket, addr)) => {
						debug!("New client connected from {}", addr);
						let ctx = self.ctx.clone();
						tokio::spawn(async move {
							if let Err(e) = handle_client(socket, ctx).await {
								error!("Error handling client {}: {}", addr, e);
							}
						});
					}
					Err(e) => {
						error!("Error accepting connection: {}", e);
					}
				},
			}
		}
	}
}

async fn handle_client(
	socket: TcpStream,
	ctx: SessionContext,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	socket.set_nodelay(true)?;
	let (reader, writer) = socket.into_split();
	ClientSession::new(reader, writer, ctx).run().await
}
