use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::broadcast;

use crate::entities::{CategoryId, CustomCategory, CustomCategoryPatch, NewCustomCategory, StoreEvent};

#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<CustomCategory>, ServerError>;
    async fn add(&self, category: NewCustomCategory) -> Result<CustomCategory, ServerError>;
    async fn update(
        &self,
        id: &CategoryId,
        patch: CustomCategoryPatch,
    ) -> Result<CustomCategory, ServerError>;
    async fn remove(&self, id: &CategoryId) -> Result<(), ServerError>;

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
