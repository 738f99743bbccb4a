use std::io::ErrorKind;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use ron::from_str;

use crate::{
    entities::StriveConfig,
    errors::{InvalidRon, ReadConfigError},
};

#[async_trait]
pub(crate) trait ConfigDatasource: Send + Sync {
    fn from_string(&self, s: &str) -> Result<StriveConfig, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<StriveConfig, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct ConfigDatasourceImpl;

impl ConfigDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConfigDatasource for ConfigDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<StriveConfig, ServerError> {
        from_str(s).map_err(|e| InvalidRon::with_debug("StriveConfig", &e))
    }

    /// A missing file yields the default configuration.
    async fn from_file<P>(&self, path: P) -> Result<StriveConfig, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(s) => self.from_string(&s),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StriveConfig::default()),
            Err(e) => Err(ReadConfigError::with_debug(&path.to_string_lossy(), &e)),
        }
    }
}
