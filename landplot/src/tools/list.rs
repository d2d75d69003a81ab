use anyhow::Result;
use landplot::store::PolygonStore;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Path to the SQLite database holding the polygon records.
	pub database: PathBuf,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let store = PolygonStore::open_path(&arguments.database)?;
	let records = store.list()?;

	for record in &records {
		println!("{:>6}  {record}", record.id);
	}
	eprintln!("{} polygon(s)", records.len());

	Ok(())
}
