use anyhow::Result;
use landplot::store::PolygonStore;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Path to the SQLite database holding the polygon records.
	pub database: PathBuf,

	/// Id of the polygon to delete permanently.
	pub id: i64,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let store = PolygonStore::open_path(&arguments.database)?;
	store.delete(arguments.id)?;

	eprintln!("deleted polygon {}", arguments.id);

	Ok(())
}
