use anyhow::{Context, Result};
use landplot::store::PolygonStore;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Path to the SQLite database holding the polygon records.
	/// The file is created on first use.
	pub database: PathBuf,

	/// Coordinate ring as a JSON array of [lng, lat] pairs,
	/// e.g. '[[13.3,52.5],[13.3,52.6],[13.4,52.6]]'.
	pub coordinates: String,

	/// Display name of the polygon.
	#[arg(short, long)]
	pub name: Option<String>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let coordinates: serde_json::Value =
		serde_json::from_str(&arguments.coordinates).context("coordinates are not valid JSON")?;

	// Direct write: the store applies the same validation and metrics
	// derivation as the HTTP path.
	let store = PolygonStore::open_path(&arguments.database)?;
	let record = store.create(arguments.name.as_deref(), Some(&coordinates))?;

	eprintln!("created polygon {}: {record}", record.id);
	eprintln!(
		"   area:      {} m²\n   perimeter: {} m",
		record.metrics.area_sq_meters, record.metrics.perimeter_meters
	);

	Ok(())
}
