//! SQLite-backed polygon repository.
//!
//! The store is the single enforcement point for every write path: the HTTP
//! handlers and the administrative CLI all go through [`PolygonStore`], so a
//! record can only reach the database after the shared structural validator
//! and the metrics calculator have both passed. Coordinate writes and the
//! recomputed metrics commit in one transaction, so there is no state in
//! which stored metrics disagree with the stored ring.

use landplot_core::{Error, LngLat, PolygonMetrics, PolygonRecord, Result};
use landplot_geometry::{GeoRingEngine, RingEngine, calculate_metrics, validate_coordinates};
use log::{debug, trace};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use r2d2_sqlite::rusqlite::{OptionalExtension, params};
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS polygons (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	name TEXT NOT NULL DEFAULT '',
	coordinates TEXT NOT NULL,
	area_sq_meters TEXT NOT NULL,
	perimeter_meters TEXT NOT NULL,
	created_at TEXT NOT NULL,
	updated_at TEXT NOT NULL
)";

const RECORD_COLUMNS: &str = "id, name, coordinates, area_sq_meters, perimeter_meters, created_at, updated_at";

/// Repository for polygon records, backed by a pooled SQLite database.
#[derive(Clone)]
pub struct PolygonStore {
	pool: Pool<SqliteConnectionManager>,
	engine: Arc<dyn RingEngine + Send + Sync>,
}

/// Raw row as stored; parsed into a [`PolygonRecord`] after the query.
struct RecordRow {
	id: i64,
	name: String,
	coordinates: String,
	area_sq_meters: String,
	perimeter_meters: String,
	created_at: String,
	updated_at: String,
}

impl PolygonStore {
	/// Opens (and if necessary creates) the database at `path`.
	pub fn open_path(path: &Path) -> Result<PolygonStore> {
		trace!("open {path:?}");
		Self::from_manager(SqliteConnectionManager::file(path), 10)
	}

	/// Opens a private in-memory database, mainly for tests. The pool is
	/// limited to a single connection so every caller sees the same data.
	pub fn open_in_memory() -> Result<PolygonStore> {
		Self::from_manager(SqliteConnectionManager::memory(), 1)
	}

	fn from_manager(manager: SqliteConnectionManager, max_size: u32) -> Result<PolygonStore> {
		let pool = Pool::builder().max_size(max_size).build(manager).map_err(Error::database)?;

		let store = PolygonStore {
			pool,
			engine: Arc::new(GeoRingEngine),
		};
		store.init_schema()?;

		Ok(store)
	}

	/// Replaces the geometry engine. Used by tests to substitute a
	/// deterministic engine.
	pub fn with_engine(mut self, engine: Arc<dyn RingEngine + Send + Sync>) -> PolygonStore {
		self.engine = engine;
		self
	}

	fn init_schema(&self) -> Result<()> {
		let conn = self.pool.get().map_err(Error::database)?;
		conn.execute(SCHEMA, []).map_err(Error::database)?;
		Ok(())
	}

	/// Validates the payload, derives metrics and inserts the record, all or
	/// nothing. `coordinates` is required.
	pub fn create(&self, name: Option<&str>, coordinates: Option<&Value>) -> Result<PolygonRecord> {
		let coordinates = coordinates.ok_or_else(required_coordinates)?;
		let ring = validate_coordinates(coordinates, self.engine.as_ref())?;
		let metrics = calculate_metrics(&ring, self.engine.as_ref())?;
		let now = OffsetDateTime::now_utc();

		let mut conn = self.pool.get().map_err(Error::database)?;
		let tx = conn.transaction().map_err(Error::database)?;
		tx.execute(
			"INSERT INTO polygons (name, coordinates, area_sq_meters, perimeter_meters, created_at, updated_at) \
			 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
			params![
				name.unwrap_or(""),
				ring_to_json(&ring)?,
				metrics.area_sq_meters.to_string(),
				metrics.perimeter_meters.to_string(),
				format_time(now)?,
				format_time(now)?,
			],
		)
		.map_err(Error::database)?;
		let id = tx.last_insert_rowid();
		tx.commit().map_err(Error::database)?;

		debug!("created polygon {id}");

		Ok(PolygonRecord {
			id,
			name: name.unwrap_or("").to_string(),
			coordinates: ring,
			metrics,
			created_at: now,
			updated_at: now,
		})
	}

	/// Returns a single record, or a not-found error.
	pub fn get(&self, id: i64) -> Result<PolygonRecord> {
		let conn = self.pool.get().map_err(Error::database)?;
		let mut stmt = conn
			.prepare(&format!("SELECT {RECORD_COLUMNS} FROM polygons WHERE id = ?1"))
			.map_err(Error::database)?;

		let row = stmt
			.query_row(params![id], read_row)
			.optional()
			.map_err(Error::database)?
			.ok_or_else(|| Error::not_found(format!("polygon {id} does not exist")))?;

		parse_record(row)
	}

	/// All records, newest-first.
	pub fn list(&self) -> Result<Vec<PolygonRecord>> {
		let conn = self.pool.get().map_err(Error::database)?;
		let mut stmt = conn
			.prepare(&format!(
				"SELECT {RECORD_COLUMNS} FROM polygons ORDER BY created_at DESC, id DESC"
			))
			.map_err(Error::database)?;

		let rows = stmt.query_map([], read_row).map_err(Error::database)?;

		let mut records = Vec::new();
		for row in rows {
			records.push(parse_record(row.map_err(Error::database)?)?);
		}

		trace!("listed {} polygons", records.len());
		Ok(records)
	}

	/// Updates a record. New coordinates pass the same validation as on
	/// create and trigger metrics recomputation before the write; a partial
	/// update without coordinates leaves ring and metrics untouched. A full
	/// update must supply coordinates.
	pub fn update(&self, id: i64, name: Option<&str>, coordinates: Option<&Value>, partial: bool) -> Result<PolygonRecord> {
		if !partial && coordinates.is_none() {
			return Err(required_coordinates());
		}

		let (ring, metrics) = match coordinates {
			Some(value) => {
				let ring = validate_coordinates(value, self.engine.as_ref())?;
				let metrics = calculate_metrics(&ring, self.engine.as_ref())?;
				(Some(ring), Some(metrics))
			}
			None => (None, None),
		};

		let mut conn = self.pool.get().map_err(Error::database)?;
		let tx = conn.transaction().map_err(Error::database)?;

		let existing = tx
			.prepare(&format!("SELECT {RECORD_COLUMNS} FROM polygons WHERE id = ?1"))
			.map_err(Error::database)?
			.query_row(params![id], read_row)
			.optional()
			.map_err(Error::database)?
			.ok_or_else(|| Error::not_found(format!("polygon {id} does not exist")))?;
		let existing = parse_record(existing)?;

		let name = name.unwrap_or(&existing.name).to_string();
		let ring = ring.unwrap_or_else(|| existing.coordinates.clone());
		let metrics = metrics.unwrap_or_else(|| existing.metrics.clone());
		let now = OffsetDateTime::now_utc();

		tx.execute(
			"UPDATE polygons SET name = ?1, coordinates = ?2, area_sq_meters = ?3, perimeter_meters = ?4, \
			 updated_at = ?5 WHERE id = ?6",
			params![
				name,
				ring_to_json(&ring)?,
				metrics.area_sq_meters.to_string(),
				metrics.perimeter_meters.to_string(),
				format_time(now)?,
				id,
			],
		)
		.map_err(Error::database)?;
		tx.commit().map_err(Error::database)?;

		debug!("updated polygon {id}");

		Ok(PolygonRecord {
			id,
			name,
			coordinates: ring,
			metrics,
			created_at: existing.created_at,
			updated_at: now,
		})
	}

	/// Permanently removes a record.
	pub fn delete(&self, id: i64) -> Result<()> {
		let conn = self.pool.get().map_err(Error::database)?;
		let affected = conn
			.execute("DELETE FROM polygons WHERE id = ?1", params![id])
			.map_err(Error::database)?;

		if affected == 0 {
			return Err(Error::not_found(format!("polygon {id} does not exist")));
		}

		debug!("deleted polygon {id}");
		Ok(())
	}

	/// Number of stored records.
	pub fn count(&self) -> Result<u64> {
		let conn = self.pool.get().map_err(Error::database)?;
		let count: i64 = conn
			.query_row("SELECT COUNT(*) FROM polygons", [], |row| row.get(0))
			.map_err(Error::database)?;
		Ok(count as u64)
	}
}

impl std::fmt::Debug for PolygonStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PolygonStore").finish_non_exhaustive()
	}
}

fn required_coordinates() -> Error {
	Error::validation("coordinates", "This field is required.")
}

fn ring_to_json(ring: &[LngLat]) -> Result<String> {
	serde_json::to_string(ring).map_err(Error::database)
}

fn read_row(row: &r2d2_sqlite::rusqlite::Row) -> r2d2_sqlite::rusqlite::Result<RecordRow> {
	Ok(RecordRow {
		id: row.get(0)?,
		name: row.get(1)?,
		coordinates: row.get(2)?,
		area_sq_meters: row.get(3)?,
		perimeter_meters: row.get(4)?,
		created_at: row.get(5)?,
		updated_at: row.get(6)?,
	})
}

fn parse_record(row: RecordRow) -> Result<PolygonRecord> {
	let coordinates: Vec<LngLat> = serde_json::from_str(&row.coordinates)
		.map_err(|err| Error::database(format!("corrupt coordinates in polygon {}: {err}", row.id)))?;

	Ok(PolygonRecord {
		id: row.id,
		name: row.name,
		coordinates,
		metrics: PolygonMetrics::new(
			parse_metric(&row.area_sq_meters, row.id)?,
			parse_metric(&row.perimeter_meters, row.id)?,
		),
		created_at: parse_time(&row.created_at)?,
		updated_at: parse_time(&row.updated_at)?,
	})
}

fn parse_metric(text: &str, id: i64) -> Result<Decimal> {
	Decimal::from_str(text).map_err(|err| Error::database(format!("corrupt metric in polygon {id}: {err}")))
}

fn format_time(time: OffsetDateTime) -> Result<String> {
	time.format(&Rfc3339).map_err(Error::database)
}

fn parse_time(text: &str) -> Result<OffsetDateTime> {
	OffsetDateTime::parse(text, &Rfc3339).map_err(Error::database)
}
