use anyhow::Result;
use landplot::server::ApiServer;
use landplot::store::PolygonStore;
use std::path::PathBuf;
use tokio::time::{Duration, sleep};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Path to the SQLite database holding the polygon records.
	/// The file is created on first use.
	pub database: PathBuf,

	/// Serve via socket ip.
	#[arg(short = 'i', long, default_value = "0.0.0.0", display_order = 0)]
	pub ip: String,

	/// Serve via port.
	#[arg(short, long, default_value_t = 8080, display_order = 0)]
	pub port: u16,

	/// Shutdown server automatically after x milliseconds.
	#[arg(long, display_order = 1)]
	pub auto_shutdown: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let store = PolygonStore::open_path(&arguments.database)?;

	let mut server = ApiServer::new(&arguments.ip, arguments.port, store);
	server.start().await?;

	if let Some(milliseconds) = arguments.auto_shutdown {
		sleep(Duration::from_millis(milliseconds)).await;
		server.stop().await;
	} else {
		loop {
			sleep(Duration::from_secs(60)).await;
		}
	}

	Ok(())
}
