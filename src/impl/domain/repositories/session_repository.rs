use async_trait::async_trait;
use fractic_server_error::ServerError;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn login(&self, email: Option<&str>) -> Result<(), ServerError>;
    async fn logout(&self) -> Result<(), ServerError>;
    async fn is_authenticated(&self) -> Result<bool, ServerError>;
    async fn user_email(&self) -> Result<Option<String>, ServerError>;
}
