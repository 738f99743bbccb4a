use std::sync::Arc;

use chrono::NaiveDate;
use fractic_server_error::ServerError;
use tokio::sync::broadcast;

use crate::{
    data::{
        datasources::{
            config_datasource::{ConfigDatasource as _, ConfigDatasourceImpl},
            storage_datasource::{
                FileStorageDatasourceImpl, MemoryStorageDatasourceImpl, StorageDatasource,
            },
        },
        models::query_params_model::QueryParamsModel,
        repositories::{
            categories_repository_impl::CategoriesRepositoryImpl,
            ledger_repository_impl::LedgerRepositoryImpl,
            session_repository_impl::SessionRepositoryImpl,
        },
    },
    domain::{
        repositories::{
            categories_repository::CategoriesRepository as _, ledger_repository::LedgerRepository as _,
        },
        usecases::{
            categories_usecase::{CategoriesUsecase as _, CategoriesUsecaseImpl},
            ledger_usecase::{LedgerUsecase as _, LedgerUsecaseImpl},
            report_usecase::{ReportUsecase as _, ReportUsecaseImpl},
            session_usecase::{SessionUsecase as _, SessionUsecaseImpl},
        },
    },
    entities::{
        Category, CategoryId, CategoryOption, CustomCategory, CustomCategoryPatch, Direction,
        DreExpandState, DreReport, EntryDraft, EntryId, ExportFile, ExportFormat, LedgerEntry,
        LedgerQuery, LedgerSummary, LedgerView, NewCustomCategory, StoreEvent, StriveConfig,
    },
    presentation::{dre_printer::DrePrinter, ledger_printer::LedgerPrinter},
};

const EVENT_CAPACITY: usize = 64;

/// Entry point of the library: wires storage, repositories and usecases for
/// one data directory (or an in-memory store).
pub struct StriveUtil {
    config: StriveConfig,
    today: Option<NaiveDate>,
    events: broadcast::Sender<StoreEvent>,
    ledger_repository: Arc<LedgerRepositoryImpl>,
    categories_repository: Arc<CategoriesRepositoryImpl>,
    ledger_usecase: LedgerUsecaseImpl,
    categories_usecase: CategoriesUsecaseImpl,
    report_usecase: ReportUsecaseImpl,
    session_usecase: SessionUsecaseImpl,
}

impl StriveUtil {
    pub fn new(config: StriveConfig, storage: Arc<dyn StorageDatasource>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let ledger_repository = Arc::new(LedgerRepositoryImpl::new(
            storage.clone(),
            config.fiscal_year,
            events.clone(),
        ));
        let categories_repository =
            Arc::new(CategoriesRepositoryImpl::new(storage.clone(), events.clone()));
        let session_repository = Arc::new(SessionRepositoryImpl::new(storage));
        Self {
            ledger_usecase: LedgerUsecaseImpl::new(
                ledger_repository.clone(),
                categories_repository.clone(),
                config.contact_aliases.clone(),
            ),
            categories_usecase: CategoriesUsecaseImpl::new(categories_repository.clone()),
            report_usecase: ReportUsecaseImpl::new(ledger_repository.clone()),
            session_usecase: SessionUsecaseImpl::new(session_repository),
            ledger_repository,
            categories_repository,
            events,
            today: None,
            config,
        }
    }

    /// File-backed store under `config.data_dir`.
    pub fn open(config: StriveConfig) -> Self {
        let storage = Arc::new(FileStorageDatasourceImpl::new(&config.data_dir));
        Self::new(config, storage)
    }

    pub fn in_memory(config: StriveConfig) -> Self {
        Self::new(config, Arc::new(MemoryStorageDatasourceImpl::new()))
    }

    /// Reads a RON config file (missing file means defaults) and opens its
    /// data directory.
    pub async fn from_config_file<P>(path: P) -> Result<Self, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let config = ConfigDatasourceImpl::new().from_file(path).await?;
        Ok(Self::open(config))
    }

    /// Pins the date used for quick filters, overdue detection and new
    /// entries. Defaults to the local date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &StriveConfig {
        &self.config
    }

    /// Notified after every write to entries or custom categories.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    // Ledger.
    // ---

    /// Loads entries and custom categories concurrently.
    pub async fn load(&self) -> Result<(Vec<LedgerEntry>, Vec<CustomCategory>), ServerError> {
        futures::try_join!(self.ledger_repository.load(), self.categories_repository.load())
    }

    pub async fn list(&self, query: &LedgerQuery) -> Result<LedgerView, ServerError> {
        self.ledger_usecase.list(query, self.today()).await
    }

    pub async fn find(&self, id: &EntryId) -> Result<Option<LedgerEntry>, ServerError> {
        self.ledger_usecase.find(id).await
    }

    pub async fn create(&self, draft: &EntryDraft) -> Result<LedgerEntry, ServerError> {
        self.ledger_usecase.create(draft, self.today()).await
    }

    pub async fn export(
        &self,
        query: &LedgerQuery,
        format: ExportFormat,
    ) -> Result<ExportFile, ServerError> {
        self.ledger_usecase.export(query, format, self.today()).await
    }

    pub async fn summary(&self, query: &LedgerQuery) -> Result<LedgerSummary, ServerError> {
        self.ledger_usecase.summary(query, self.today()).await
    }

    /// Query-string form of the synced list state, e.g. `dir=saidas&atras=0`.
    pub fn encode_query(query: &LedgerQuery) -> String {
        QueryParamsModel::encode(query)
    }

    pub fn decode_query(s: &str) -> Result<LedgerQuery, ServerError> {
        QueryParamsModel::decode(s)
    }

    // Categories.
    // ---

    pub async fn categories(&self, direction: Direction) -> Result<Vec<Category>, ServerError> {
        self.categories_usecase.tree(direction).await
    }

    pub async fn category_options(
        &self,
        direction: Direction,
    ) -> Result<Vec<CategoryOption>, ServerError> {
        self.categories_usecase.options(direction).await
    }

    pub async fn custom_categories(&self) -> Result<Vec<CustomCategory>, ServerError> {
        self.categories_usecase.custom().await
    }

    pub async fn add_category(
        &self,
        category: NewCustomCategory,
    ) -> Result<CustomCategory, ServerError> {
        self.categories_usecase.add(category).await
    }

    pub async fn update_category(
        &self,
        id: &CategoryId,
        patch: CustomCategoryPatch,
    ) -> Result<CustomCategory, ServerError> {
        self.categories_usecase.update(id, patch).await
    }

    pub async fn remove_category(&self, id: &CategoryId) -> Result<(), ServerError> {
        self.categories_usecase.remove(id).await
    }

    // Reports.
    // ---

    pub async fn dre(&self, year: i32) -> Result<DreReport, ServerError> {
        self.report_usecase.dre(year).await
    }

    // Session.
    // ---

    pub async fn login(&self, email: Option<&str>) -> Result<(), ServerError> {
        self.session_usecase.login(email).await
    }

    pub async fn logout(&self) -> Result<(), ServerError> {
        self.session_usecase.logout().await
    }

    pub async fn current_user(&self) -> Result<Option<String>, ServerError> {
        self.session_usecase.current_user().await
    }

    // Text rendering.
    // ---

    pub async fn print_list(&self, view: &LedgerView) -> Result<String, ServerError> {
        let customs = self.custom_categories().await?;
        Ok(LedgerPrinter::new(&customs).print_list(view))
    }

    pub async fn print_details(&self, entry: &LedgerEntry) -> Result<String, ServerError> {
        let customs = self.custom_categories().await?;
        Ok(LedgerPrinter::new(&customs).print_details(entry))
    }

    pub fn print_summary(&self, summary: &LedgerSummary) -> String {
        LedgerPrinter::new(&[]).print_summary(summary)
    }

    pub fn print_dre(&self, report: &DreReport, expand: &DreExpandState) -> String {
        DrePrinter::new(expand).print(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{
            datasources::storage_datasource::{ENTRIES_HASH_KEY, ENTRIES_KEY, ENTRIES_VERSION_KEY},
            models::ledger_entry_model::LedgerEntryModel,
        },
        domain::logic::seed_data::{seed_entries, seed_hash, SEED_VERSION},
        entities::{DirectionFilter, EntryKind, EntryMode, EntryStatus, FilterState},
    };

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Store holding exactly `entries`, marked as up to date with the seed
    /// so that loading does not reseed it.
    async fn util_with(entries: &[LedgerEntry]) -> StriveUtil {
        let storage = Arc::new(MemoryStorageDatasourceImpl::new());
        let models: Vec<LedgerEntryModel> = entries.iter().map(Into::into).collect();
        storage
            .set(ENTRIES_KEY, &serde_json::to_string(&models).unwrap())
            .await
            .unwrap();
        storage.set(ENTRIES_VERSION_KEY, SEED_VERSION).await.unwrap();
        storage
            .set(ENTRIES_HASH_KEY, &seed_hash(&seed_entries()))
            .await
            .unwrap();
        StriveUtil::new(StriveConfig::default(), storage).with_today(d(2025, 6, 15))
    }

    fn march_april_entries() -> Vec<LedgerEntry> {
        vec![
            LedgerEntry::new(
                "a",
                EntryKind::Incoming,
                "Mensalidade",
                "05/03/2025",
                1000.0,
                EntryStatus::Completed,
                "venda_servicos",
                "Tech Solutions Ltda",
            ),
            LedgerEntry::new(
                "b",
                EntryKind::Outgoing,
                "AWS",
                "10/03/2025",
                -500.0,
                EntryStatus::Completed,
                "software_ferramentas",
                "Amazon Web Services",
            ),
            LedgerEntry::new(
                "c",
                EntryKind::Outgoing,
                "Energia",
                "02/04/2025",
                -200.0,
                EntryStatus::Open,
                "energia",
                "Enel",
            ),
        ]
    }

    fn ids(view: &LedgerView) -> Vec<&str> {
        view.entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[tokio::test]
    async fn filters_and_dre_over_a_small_ledger() {
        let util = util_with(&march_april_entries()).await;

        let outflows = LedgerQuery {
            filters: FilterState {
                direction: DirectionFilter::Outflows,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&util.list(&outflows).await.unwrap()), vec!["b", "c"]);

        let march = LedgerQuery {
            filters: FilterState {
                due_from: Some(d(2025, 3, 1)),
                due_to: Some(d(2025, 3, 31)),
                ..Default::default()
            },
            ..Default::default()
        };
        let view = util.list(&march).await.unwrap();
        assert_eq!(ids(&view), vec!["a", "b"]);
        assert_eq!(view.total_entries, 3);

        let report = util.dre(2025).await.unwrap();
        assert_eq!(report.line("Software e ferramentas digitais")[2], -500.0);
    }

    #[tokio::test]
    async fn csv_export_matches_the_filtered_view() {
        let util = util_with(&march_april_entries()).await;
        let query = StriveUtil::decode_query("dir=saidas").unwrap();
        let file = util.export(&query, ExportFormat::Csv).await.unwrap();

        let content = file.content.trim_start_matches('\u{feff}');
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("\"R$ 500,00\""));
        assert!(lines[2].contains("\"R$ 200,00\""));
        assert_eq!(file.file_name, "lancamentos_.csv");
    }

    #[test]
    fn url_query_survives_a_round_trip() {
        let query = LedgerQuery {
            filters: FilterState {
                direction: DirectionFilter::Outflows,
                due_from: Some(d(2025, 3, 1)),
                due_to: Some(d(2025, 3, 31)),
                ..Default::default()
            },
            search: "aws".to_string(),
            overdue: true,
            ..Default::default()
        };
        let encoded = StriveUtil::encode_query(&query);
        assert_eq!(StriveUtil::decode_query(&encoded).unwrap(), query);
    }

    #[tokio::test]
    async fn entries_outside_2025_are_rejected() {
        let util = StriveUtil::in_memory(StriveConfig::default()).with_today(d(2025, 6, 15));
        let draft = EntryDraft {
            description: "Consultoria".to_string(),
            due_date: Some(d(2024, 12, 20)),
            amount: "1.500,00".to_string(),
            category: "consultoria".to_string(),
            ..Default::default()
        };
        let err = util.create(&draft).await.unwrap_err();
        assert!(format!("{:?}", err).contains("2024"));

        let (entries, _) = util.load().await.unwrap();
        assert_eq!(entries.len(), seed_entries().len());
    }

    #[tokio::test]
    async fn created_entries_persist_in_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StriveConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let draft = EntryDraft {
            direction: Direction::Outflow,
            mode: EntryMode::Installment,
            description: "Notebook".to_string(),
            due_date: Some(d(2025, 7, 10)),
            amount: "3.000,00".to_string(),
            category: "equipamentos".to_string(),
            installment_count: 3,
            ..Default::default()
        };

        let util = StriveUtil::open(config.clone()).with_today(d(2025, 7, 1));
        let mut events = util.subscribe();
        let created = util.create(&draft).await.unwrap();
        assert_eq!(created.amount, -3000.0);
        assert_eq!(events.recv().await.unwrap(), StoreEvent::EntriesUpdated);

        let reopened = StriveUtil::open(config);
        let found = reopened.find(&created.id).await.unwrap().unwrap();
        assert_eq!(found.installment.as_deref(), Some("1/3"));
        let (entries, _) = reopened.load().await.unwrap();
        assert_eq!(entries[0].id, created.id);
    }

    #[tokio::test]
    async fn custom_categories_flow() {
        let util = StriveUtil::in_memory(StriveConfig::default());
        let mut events = util.subscribe();

        let added = util
            .add_category(NewCustomCategory {
                value: "  Eventos Corporativos ".to_string(),
                label: " Eventos corporativos ".to_string(),
                direction: Direction::Inflow,
                parent_category: None,
            })
            .await
            .unwrap();
        assert_eq!(added.value, "eventos_corporativos");
        assert_eq!(added.label, "Eventos corporativos");
        assert_eq!(events.recv().await.unwrap(), StoreEvent::CategoriesUpdated);

        let options = util.category_options(Direction::Inflow).await.unwrap();
        assert!(options
            .iter()
            .any(|o| o.value == "eventos_corporativos" && o.is_custom));
        assert!(!util
            .category_options(Direction::Outflow)
            .await
            .unwrap()
            .iter()
            .any(|o| o.is_custom));

        let duplicate = util
            .add_category(NewCustomCategory {
                value: "eventos corporativos".to_string(),
                label: "Outro".to_string(),
                direction: Direction::Inflow,
                parent_category: None,
            })
            .await;
        assert!(duplicate.is_err());

        let renamed = util
            .update_category(
                &added.id,
                CustomCategoryPatch {
                    label: Some("Eventos".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.label, "Eventos");

        util.remove_category(&added.id).await.unwrap();
        assert!(util.custom_categories().await.unwrap().is_empty());
        assert!(util.remove_category(&added.id).await.is_err());
    }

    #[tokio::test]
    async fn session_flags() {
        let util = StriveUtil::in_memory(StriveConfig::default());
        assert_eq!(util.current_user().await.unwrap(), None);
        util.login(Some("ana@empresa.com")).await.unwrap();
        assert_eq!(
            util.current_user().await.unwrap().as_deref(),
            Some("ana@empresa.com")
        );
        util.logout().await.unwrap();
        assert_eq!(util.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn summary_and_text_views() {
        let util = util_with(&march_april_entries()).await;
        let query = LedgerQuery::default();

        let summary = util.summary(&query).await.unwrap();
        assert_eq!(summary.inflows, 1000.0);
        assert_eq!(summary.outflows, 700.0);
        assert_eq!(summary.overdue, 1);

        let view = util.list(&query).await.unwrap();
        let text = util.print_list(&view).await.unwrap();
        assert!(text.contains("3 de 3"));

        let report = util.dre(2025).await.unwrap();
        let printed = util.print_dre(&report, &DreExpandState::all_expanded());
        assert!(printed.contains("Software e ferramentas digitais"));
    }
}
