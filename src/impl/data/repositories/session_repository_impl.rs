use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    data::datasources::storage_datasource::{
        StorageDatasource, IS_AUTHENTICATED_KEY, USER_EMAIL_KEY,
    },
    domain::repositories::session_repository::SessionRepository,
};

const DEFAULT_EMAIL: &str = "usuário@exemplo.com";

/// Session flags only; no credential is checked or stored.
pub(crate) struct SessionRepositoryImpl {
    storage: Arc<dyn StorageDatasource>,
}

#[async_trait]
impl SessionRepository for SessionRepositoryImpl {
    async fn login(&self, email: Option<&str>) -> Result<(), ServerError> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EMAIL);
        self.storage.set(IS_AUTHENTICATED_KEY, "true").await?;
        self.storage.set(USER_EMAIL_KEY, email).await?;
        info!(email, "logged in");
        Ok(())
    }

    async fn logout(&self) -> Result<(), ServerError> {
        self.storage.remove(IS_AUTHENTICATED_KEY).await?;
        self.storage.remove(USER_EMAIL_KEY).await?;
        info!("logged out");
        Ok(())
    }

    async fn is_authenticated(&self) -> Result<bool, ServerError> {
        Ok(self.storage.get(IS_AUTHENTICATED_KEY).await?.as_deref() == Some("true"))
    }

    async fn user_email(&self) -> Result<Option<String>, ServerError> {
        self.storage.get(USER_EMAIL_KEY).await
    }
}

impl SessionRepositoryImpl {
    pub(crate) fn new(storage: Arc<dyn StorageDatasource>) -> Self {
        Self { storage }
    }
}
