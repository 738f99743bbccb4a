use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::repositories::categories_repository_impl::CategoriesRepositoryImpl,
    domain::{
        logic::taxonomy::{all_subcategories, categories_with_custom, normalize_category_value},
        repositories::categories_repository::CategoriesRepository,
    },
    entities::{
        Category, CategoryId, CategoryOption, CustomCategory, CustomCategoryPatch, Direction,
        NewCustomCategory,
    },
};

#[async_trait]
pub trait CategoriesUsecase: Send + Sync {
    /// Built-in taxonomy merged with the custom categories of the direction.
    async fn tree(&self, direction: Direction) -> Result<Vec<Category>, ServerError>;

    /// Flat list of selectable leaves, as offered by the entry form.
    async fn options(&self, direction: Direction) -> Result<Vec<CategoryOption>, ServerError>;

    async fn custom(&self) -> Result<Vec<CustomCategory>, ServerError>;

    /// `value` is normalized before the duplicate check.
    async fn add(&self, category: NewCustomCategory) -> Result<CustomCategory, ServerError>;

    async fn update(
        &self,
        id: &CategoryId,
        patch: CustomCategoryPatch,
    ) -> Result<CustomCategory, ServerError>;

    async fn remove(&self, id: &CategoryId) -> Result<(), ServerError>;
}

pub(crate) struct CategoriesUsecaseImpl<R1 = CategoriesRepositoryImpl>
where
    R1: CategoriesRepository,
{
    categories_repository: Arc<R1>,
}

#[async_trait]
impl<R1> CategoriesUsecase for CategoriesUsecaseImpl<R1>
where
    R1: CategoriesRepository,
{
    async fn tree(&self, direction: Direction) -> Result<Vec<Category>, ServerError> {
        let customs = self.categories_repository.load().await?;
        Ok(categories_with_custom(direction, &customs))
    }

    async fn options(&self, direction: Direction) -> Result<Vec<CategoryOption>, ServerError> {
        let customs = self.categories_repository.load().await?;
        Ok(all_subcategories(direction, &customs))
    }

    async fn custom(&self) -> Result<Vec<CustomCategory>, ServerError> {
        self.categories_repository.load().await
    }

    async fn add(&self, mut category: NewCustomCategory) -> Result<CustomCategory, ServerError> {
        category.value = normalize_category_value(&category.value)?;
        category.label = category.label.trim().to_string();
        self.categories_repository.add(category).await
    }

    async fn update(
        &self,
        id: &CategoryId,
        mut patch: CustomCategoryPatch,
    ) -> Result<CustomCategory, ServerError> {
        if let Some(value) = patch.value.take() {
            patch.value = Some(normalize_category_value(&value)?);
        }
        patch.label = patch.label.map(|l| l.trim().to_string());
        self.categories_repository.update(id, patch).await
    }

    async fn remove(&self, id: &CategoryId) -> Result<(), ServerError> {
        self.categories_repository.remove(id).await
    }
}

impl<R1> CategoriesUsecaseImpl<R1>
where
    R1: CategoriesRepository,
{
    pub(crate) fn new(categories_repository: Arc<R1>) -> Self {
        Self {
            categories_repository,
        }
    }
}
