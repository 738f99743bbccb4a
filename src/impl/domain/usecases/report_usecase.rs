use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::warn;

use crate::{
    data::repositories::ledger_repository_impl::LedgerRepositoryImpl,
    domain::{logic::dre_aggregator::DreAggregator, repositories::ledger_repository::LedgerRepository},
    entities::DreReport,
};

#[async_trait]
pub trait ReportUsecase: Send + Sync {
    /// Monthly income statement (DRE) of the given year.
    async fn dre(&self, year: i32) -> Result<DreReport, ServerError>;
}

pub(crate) struct ReportUsecaseImpl<R1 = LedgerRepositoryImpl>
where
    R1: LedgerRepository,
{
    ledger_repository: Arc<R1>,
}

#[async_trait]
impl<R1> ReportUsecase for ReportUsecaseImpl<R1>
where
    R1: LedgerRepository,
{
    async fn dre(&self, year: i32) -> Result<DreReport, ServerError> {
        let entries = self.ledger_repository.load().await?;
        let report = DreAggregator::new(year).aggregate(&entries);
        if report.unmapped_entries > 0 {
            warn!(year, count = report.unmapped_entries, "entries without a DRE line were left out");
        }
        if report.invalid_dates > 0 {
            warn!(year, count = report.invalid_dates, "entries with unparseable due dates were left out");
        }
        Ok(report)
    }
}

impl<R1> ReportUsecaseImpl<R1>
where
    R1: LedgerRepository,
{
    pub(crate) fn new(ledger_repository: Arc<R1>) -> Self {
        Self { ledger_repository }
    }
}
