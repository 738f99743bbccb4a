use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use fractic_server_error::ServerError;
use tracing::{debug, info};

use crate::{
    data::repositories::{
        categories_repository_impl::CategoriesRepositoryImpl,
        ledger_repository_impl::LedgerRepositoryImpl,
    },
    domain::{
        logic::{entry_builder::EntryBuilder, ledger_filter::LedgerFilter, summarizer::summarize},
        repositories::{
            categories_repository::CategoriesRepository, ledger_repository::LedgerRepository,
        },
    },
    entities::{
        EntryDraft, EntryId, ExportFile, ExportFormat, LedgerEntry, LedgerQuery, LedgerSummary,
        LedgerView,
    },
    presentation::ledger_exporter::LedgerExporter,
};

#[async_trait]
pub trait LedgerUsecase: Send + Sync {
    /// Entries matching the query, relative to `today` for quick buckets and
    /// overdue detection.
    async fn list(&self, query: &LedgerQuery, today: NaiveDate) -> Result<LedgerView, ServerError>;

    async fn find(&self, id: &EntryId) -> Result<Option<LedgerEntry>, ServerError>;

    async fn create(&self, draft: &EntryDraft, today: NaiveDate) -> Result<LedgerEntry, ServerError>;

    async fn export(
        &self,
        query: &LedgerQuery,
        format: ExportFormat,
        today: NaiveDate,
    ) -> Result<ExportFile, ServerError>;

    /// Dashboard totals over the entries matching the query.
    async fn summary(&self, query: &LedgerQuery, today: NaiveDate) -> Result<LedgerSummary, ServerError>;
}

pub(crate) struct LedgerUsecaseImpl<
    R1 = LedgerRepositoryImpl,       // Default.
    R2 = CategoriesRepositoryImpl, // Default.
> where
    R1: LedgerRepository,
    R2: CategoriesRepository,
{
    ledger_repository: Arc<R1>,
    categories_repository: Arc<R2>,
    contact_aliases: Vec<(String, String)>,
}

#[async_trait]
impl<R1, R2> LedgerUsecase for LedgerUsecaseImpl<R1, R2>
where
    R1: LedgerRepository,
    R2: CategoriesRepository,
{
    async fn list(&self, query: &LedgerQuery, today: NaiveDate) -> Result<LedgerView, ServerError> {
        let entries = self.ledger_repository.load().await?;
        let view = LedgerFilter::new(query, today, &self.contact_aliases).apply(&entries);
        debug!(
            shown = view.entries.len(),
            total = view.total_entries,
            unparseable_dates = view.unparseable_dates,
            "listed entries"
        );
        Ok(view)
    }

    async fn find(&self, id: &EntryId) -> Result<Option<LedgerEntry>, ServerError> {
        Ok(self
            .ledger_repository
            .load()
            .await?
            .into_iter()
            .find(|e| &e.id == id))
    }

    async fn create(&self, draft: &EntryDraft, today: NaiveDate) -> Result<LedgerEntry, ServerError> {
        let entry = EntryBuilder::new(today).build(draft)?;
        self.ledger_repository.add(entry.clone()).await?;
        info!(id = %entry.id, due_date = %entry.due_date, "created entry");
        Ok(entry)
    }

    async fn export(
        &self,
        query: &LedgerQuery,
        format: ExportFormat,
        today: NaiveDate,
    ) -> Result<ExportFile, ServerError> {
        let (entries, custom_categories) = futures::try_join!(
            self.ledger_repository.load(),
            self.categories_repository.load()
        )?;
        let filter = LedgerFilter::new(query, today, &self.contact_aliases);
        let view = filter.apply(&entries);
        // Only a closed range is shown in the file name.
        let range = match filter.date_range() {
            Some((Some(from), Some(to))) => Some((from, to)),
            _ => None,
        };
        let file = LedgerExporter::new(&custom_categories).export(&view.entries, format, range)?;
        info!(file_name = %file.file_name, rows = view.entries.len(), "exported entries");
        Ok(file)
    }

    async fn summary(&self, query: &LedgerQuery, today: NaiveDate) -> Result<LedgerSummary, ServerError> {
        let view = self.list(query, today).await?;
        Ok(summarize(&view.entries, today))
    }
}

impl<R1, R2> LedgerUsecaseImpl<R1, R2>
where
    R1: LedgerRepository,
    R2: CategoriesRepository,
{
    pub(crate) fn new(
        ledger_repository: Arc<R1>,
        categories_repository: Arc<R2>,
        contact_aliases: Vec<(String, String)>,
    ) -> Self {
        Self {
            ledger_repository,
            categories_repository,
            contact_aliases,
        }
    }
}
