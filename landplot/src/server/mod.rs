//! HTTP server for the polygon API.

mod handlers;
mod routes;

pub use routes::build_router;

use crate::store::PolygonStore;
use anyhow::Result;
use tokio::sync::oneshot::Sender;

/// Server lifecycle around the polygon router.
///
/// `start` binds the listener and serves in a background task; `stop` shuts
/// the task down gracefully via the exit signal.
pub struct ApiServer {
	ip: String,
	port: u16,
	store: PolygonStore,
	exit_signal: Option<Sender<()>>,
}

impl ApiServer {
	pub fn new(ip: &str, port: u16, store: PolygonStore) -> ApiServer {
		ApiServer {
			ip: ip.to_owned(),
			port,
			store,
			exit_signal: None,
		}
	}

	pub async fn start(&mut self) -> Result<()> {
		if self.exit_signal.is_some() {
			self.stop().await;
		}

		log::info!("starting server");

		let router = build_router(self.store.clone());

		let addr = format!("{}:{}", self.ip, self.port);
		eprintln!("server starts listening on {addr}");

		let listener = tokio::net::TcpListener::bind(addr).await?;
		let (tx, rx) = tokio::sync::oneshot::channel::<()>();

		tokio::spawn(async {
			axum::serve(listener, router.into_make_service())
				.with_graceful_shutdown(async {
					rx.await.ok();
				})
				.await
				.expect("server failed")
		});

		self.exit_signal = Some(tx);

		Ok(())
	}

	pub async fn stop(&mut self) {
		if self.exit_signal.is_none() {
			return;
		}

		log::info!("stopping server");

		self.exit_signal.take().unwrap().send(()).ok();
	}
}
