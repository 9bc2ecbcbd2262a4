use rockscache::Server;
use rockscache::config::Cli;
use rockscache::config::Parser;
use rockscache::config::setup;
use rockscache::logo::show_logo;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	let args = Cli::parse();
	let config = setup(args)?;

	let runtime = tokio::runtime::Builder::new_multi_thread()
		.worker_threads(config.worker_threads)
		.enable_all()
		.build()?;

	runtime.block_on(async move {
		show_logo(&config.addr());
		let server = Server::bind(&config).await?;
		info!(
			"Starting with {} worker threads, idle timeout {:?}",
			config.worker_threads,
			config.idle_timeout()
		);

		server
			.run_with_shutdown(async {
				if let Err(e) = tokio::signal::ctrl_c().await {
					tracing::error!("Failed to listen for Ctrl-C: {}", e);
					std::future::pending::<()>().await;
				}
			})
			.await
	})
}
