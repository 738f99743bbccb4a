use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info};

use crate::{
    data::{
        datasources::storage_datasource::{StorageDatasource, CUSTOM_CATEGORIES_KEY},
        models::custom_category_model::CustomCategoryModel,
    },
    domain::repositories::categories_repository::CategoriesRepository,
    entities::{
        CategoryId, CustomCategory, CustomCategoryPatch, Direction, NewCustomCategory, StoreEvent,
    },
    errors::{CategoryNotFound, DuplicateCategory, InvalidJson, MissingRequiredFields},
};

pub(crate) struct CategoriesRepositoryImpl {
    storage: Arc<dyn StorageDatasource>,
    events: broadcast::Sender<StoreEvent>,
    lock: Mutex<()>,
}

#[async_trait]
impl CategoriesRepository for CategoriesRepositoryImpl {
    async fn load(&self) -> Result<Vec<CustomCategory>, ServerError> {
        Ok(self.read().await)
    }

    async fn add(&self, category: NewCustomCategory) -> Result<CustomCategory, ServerError> {
        require_fields(&category.value, &category.label)?;

        let _guard = self.lock.lock().await;
        let mut categories = self.read().await;
        if categories
            .iter()
            .any(|c| c.value == category.value && c.direction == category.direction)
        {
            return Err(duplicate(&category.value, category.direction));
        }

        let created = CustomCategory {
            id: generate_id(),
            value: category.value,
            label: category.label,
            direction: category.direction,
            parent_category: category.parent_category,
            is_custom: true,
        };
        info!(id = %created.id, value = %created.value, "adding custom category");
        categories.push(created.clone());
        self.write(&categories).await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: &CategoryId,
        patch: CustomCategoryPatch,
    ) -> Result<CustomCategory, ServerError> {
        let _guard = self.lock.lock().await;
        let mut categories = self.read().await;
        let index = categories
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| CategoryNotFound::new(id.as_str()))?;

        let mut updated = categories[index].clone();
        if let Some(value) = patch.value {
            updated.value = value;
        }
        if let Some(label) = patch.label {
            updated.label = label;
        }
        if let Some(direction) = patch.direction {
            updated.direction = direction;
        }
        if let Some(parent_category) = patch.parent_category {
            updated.parent_category = parent_category;
        }
        require_fields(&updated.value, &updated.label)?;
        if categories
            .iter()
            .any(|c| &c.id != id && c.value == updated.value && c.direction == updated.direction)
        {
            return Err(duplicate(&updated.value, updated.direction));
        }

        info!(id = %id, "updating custom category");
        categories[index] = updated.clone();
        self.write(&categories).await?;
        Ok(updated)
    }

    /// Children of the removed category keep their dangling parent id.
    async fn remove(&self, id: &CategoryId) -> Result<(), ServerError> {
        let _guard = self.lock.lock().await;
        let mut categories = self.read().await;
        let before = categories.len();
        categories.retain(|c| &c.id != id);
        if categories.len() == before {
            return Err(CategoryNotFound::new(id.as_str()));
        }
        info!(id = %id, "removing custom category");
        self.write(&categories).await
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

impl CategoriesRepositoryImpl {
    pub(crate) fn new(storage: Arc<dyn StorageDatasource>, events: broadcast::Sender<StoreEvent>) -> Self {
        Self {
            storage,
            events,
            lock: Mutex::new(()),
        }
    }

    /// Unreadable storage counts as no custom categories.
    async fn read(&self) -> Vec<CustomCategory> {
        match self.try_read().await {
            Ok(categories) => categories,
            Err(e) => {
                error!(error = ?e, "failed to load custom categories");
                Vec::new()
            }
        }
    }

    async fn try_read(&self) -> Result<Vec<CustomCategory>, ServerError> {
        let Some(json) = self.storage.get(CUSTOM_CATEGORIES_KEY).await? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str::<Vec<CustomCategoryModel>>(&json)
            .map_err(|e| InvalidJson::with_debug("custom categories", &e))?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn write(&self, categories: &[CustomCategory]) -> Result<(), ServerError> {
        let models: Vec<CustomCategoryModel> = categories.iter().map(Into::into).collect();
        let json = serde_json::to_string(&models)
            .map_err(|e| InvalidJson::with_debug("custom categories", &e))?;
        self.storage.set(CUSTOM_CATEGORIES_KEY, &json).await?;
        let _ = self.events.send(StoreEvent::CategoriesUpdated);
        Ok(())
    }
}

fn require_fields(value: &str, label: &str) -> Result<(), ServerError> {
    match (value.trim().is_empty(), label.trim().is_empty()) {
        (false, false) => Ok(()),
        (true, false) => Err(MissingRequiredFields::new("value")),
        (false, true) => Err(MissingRequiredFields::new("label")),
        (true, true) => Err(MissingRequiredFields::new("value, label")),
    }
}

fn duplicate(value: &str, direction: Direction) -> ServerError {
    DuplicateCategory::new(value, direction.label())
}

/// `custom-<unix millis>-<9 random alphanumerics>`.
fn generate_id() -> CategoryId {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().simple().to_string();
    CategoryId(format!("custom-{}-{}", millis, &random[..9]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datasources::storage_datasource::MemoryStorageDatasourceImpl;

    fn repository() -> (CategoriesRepositoryImpl, Arc<MemoryStorageDatasourceImpl>) {
        let storage = Arc::new(MemoryStorageDatasourceImpl::new());
        let (events, _) = broadcast::channel(16);
        (CategoriesRepositoryImpl::new(storage.clone(), events), storage)
    }

    fn new(value: &str, direction: Direction) -> NewCustomCategory {
        NewCustomCategory {
            value: value.to_string(),
            label: value.to_uppercase(),
            direction,
            parent_category: None,
        }
    }

    #[tokio::test]
    async fn add_generates_ids_and_persists() {
        let (repository, storage) = repository();
        let mut events = repository.subscribe();

        let created = repository.add(new("saas", Direction::Outflow)).await.unwrap();

        assert!(created.id.as_str().starts_with("custom-"));
        assert_eq!(created.id.as_str().rsplit('-').next().unwrap().len(), 9);
        assert!(created.is_custom);
        assert_eq!(events.recv().await.unwrap(), StoreEvent::CategoriesUpdated);
        let json = storage.get(CUSTOM_CATEGORIES_KEY).await.unwrap().unwrap();
        assert!(json.contains(r#""tipo":"saida""#));
        assert_eq!(repository.load().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn duplicates_are_per_direction() {
        let (repository, _) = repository();
        repository.add(new("saas", Direction::Outflow)).await.unwrap();

        assert!(repository.add(new("saas", Direction::Outflow)).await.is_err());
        assert!(repository.add(new("saas", Direction::Inflow)).await.is_ok());
    }

    #[tokio::test]
    async fn update_checks_duplicates_against_others_only() {
        let (repository, _) = repository();
        let a = repository.add(new("a", Direction::Outflow)).await.unwrap();
        repository.add(new("b", Direction::Outflow)).await.unwrap();

        let relabeled = repository
            .update(
                &a.id,
                CustomCategoryPatch {
                    label: Some("Nova".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(relabeled.label, "Nova");
        assert_eq!(relabeled.value, "a");

        let clash = CustomCategoryPatch {
            value: Some("b".to_string()),
            ..Default::default()
        };
        assert!(repository.update(&a.id, clash).await.is_err());
        assert_eq!(repository.load().await.unwrap()[0].value, "a");
    }

    #[tokio::test]
    async fn unknown_ids_are_rejected() {
        let (repository, _) = repository();
        let missing = CategoryId::new("custom-0-nope");
        assert!(repository.remove(&missing).await.is_err());
        assert!(repository
            .update(&missing, CustomCategoryPatch::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn remove_leaves_children_in_place() {
        let (repository, _) = repository();
        let parent = repository.add(new("infra", Direction::Outflow)).await.unwrap();
        let child = repository
            .add(NewCustomCategory {
                parent_category: Some(parent.id.clone()),
                ..new("infra_cloud", Direction::Outflow)
            })
            .await
            .unwrap();

        repository.remove(&parent.id).await.unwrap();

        assert_eq!(repository.load().await.unwrap(), vec![child]);
    }

    #[tokio::test]
    async fn empty_label_is_rejected() {
        let (repository, _) = repository();
        let category = NewCustomCategory {
            label: " ".to_string(),
            ..new("x", Direction::Inflow)
        };
        assert!(repository.add(category).await.is_err());
    }
}
