use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::broadcast;

use crate::entities::{LedgerEntry, StoreEvent};

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Current entries, seeding or reconciling the stored array as needed.
    async fn load(&self) -> Result<Vec<LedgerEntry>, ServerError>;

    /// Prepends a validated entry and persists the whole array.
    async fn add(&self, entry: LedgerEntry) -> Result<Vec<LedgerEntry>, ServerError>;

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
