use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::repositories::session_repository_impl::SessionRepositoryImpl,
    domain::repositories::session_repository::SessionRepository,
};

#[async_trait]
pub trait SessionUsecase: Send + Sync {
    async fn login(&self, email: Option<&str>) -> Result<(), ServerError>;
    async fn logout(&self) -> Result<(), ServerError>;

    /// Email of the logged-in user, or `None` when logged out.
    async fn current_user(&self) -> Result<Option<String>, ServerError>;
}

pub(crate) struct SessionUsecaseImpl<R1 = SessionRepositoryImpl>
where
    R1: SessionRepository,
{
    session_repository: Arc<R1>,
}

#[async_trait]
impl<R1> SessionUsecase for SessionUsecaseImpl<R1>
where
    R1: SessionRepository,
{
    async fn login(&self, email: Option<&str>) -> Result<(), ServerError> {
        self.session_repository.login(email).await
    }

    async fn logout(&self) -> Result<(), ServerError> {
        self.session_repository.logout().await
    }

    async fn current_user(&self) -> Result<Option<String>, ServerError> {
        if !self.session_repository.is_authenticated().await? {
            return Ok(None);
        }
        self.session_repository.user_email().await
    }
}

impl<R1> SessionUsecaseImpl<R1>
where
    R1: SessionRepository,
{
    pub(crate) fn new(session_repository: Arc<R1>) -> Self {
        Self { session_repository }
    }
}
