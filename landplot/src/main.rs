mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

// Define the command-line interface using the clap crate
#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	#[clap(alias = "server")]
	/// Serve the polygon API via http
	Serve(tools::serve::Subcommand),

	#[clap(alias = "ls")]
	/// List all stored polygons
	List(tools::list::Subcommand),

	#[clap(alias = "add")]
	/// Insert a polygon directly into the database
	Insert(tools::insert::Subcommand),

	#[clap(alias = "rm")]
	/// Delete a polygon directly from the database
	Remove(tools::remove::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	// Initialize logger and set log level based on verbosity flag
	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Serve(arguments) => tools::serve::run(arguments),
		Commands::List(arguments) => tools::list::run(arguments),
		Commands::Insert(arguments) => tools::insert::run(arguments),
		Commands::Remove(arguments) => tools::remove::run(arguments),
	}
}
