use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use crate::{config::AppConfig, record_store::RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    // Sólo lectura tras la carga; no necesita Mutex.
    pub store: Arc<RecordStore>,
    pub shutdown_sender: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl AppState {
    pub fn new(config: AppConfig, store: RecordStore, shutdown_tx: oneshot::Sender<()>) -> Self {
        Self {
            config,
            store: Arc::new(store),
            shutdown_sender: Arc::new(Mutex::new(Some(shutdown_tx))),
        }
    }
}
