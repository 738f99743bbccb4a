use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use chrono::Datelike as _;
use fractic_server_error::ServerError;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::{
    data::{
        datasources::storage_datasource::{
            StorageDatasource, ENTRIES_HASH_KEY, ENTRIES_KEY, ENTRIES_VERSION_KEY,
        },
        models::ledger_entry_model::LedgerEntryModel,
    },
    domain::{
        logic::seed_data::{seed_entries, seed_hash, SEED_VERSION},
        repositories::ledger_repository::LedgerRepository,
    },
    entities::{EntryId, LedgerEntry, StoreEvent},
    errors::{EntryOutsideFiscalYear, InvalidBrDate, InvalidJson},
};

pub(crate) struct LedgerRepositoryImpl {
    storage: Arc<dyn StorageDatasource>,
    fiscal_year: i32,
    events: broadcast::Sender<StoreEvent>,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

/// What `load` found in storage, before reconciliation.
enum Stored {
    Current(Vec<LedgerEntry>),
    Stale(Vec<LedgerEntry>),
    Missing,
}

#[async_trait]
impl LedgerRepository for LedgerRepositoryImpl {
    async fn load(&self) -> Result<Vec<LedgerEntry>, ServerError> {
        let _guard = self.lock.lock().await;
        Ok(self.load_unlocked().await)
    }

    async fn add(&self, entry: LedgerEntry) -> Result<Vec<LedgerEntry>, ServerError> {
        let due = entry
            .due()
            .ok_or_else(|| InvalidBrDate::new(&entry.due_date))?;
        if due.year() != self.fiscal_year {
            warn!(due_date = %entry.due_date, year = self.fiscal_year, "rejected entry outside the fiscal year");
            return Err(EntryOutsideFiscalYear::new(self.fiscal_year, &entry.due_date));
        }

        let _guard = self.lock.lock().await;
        let mut entries = self.load_unlocked().await;
        debug!(id = %entry.id, "adding entry");
        entries.insert(0, entry);
        self.write_entries(&entries).await?;
        let _ = self.events.send(StoreEvent::EntriesUpdated);
        Ok(entries)
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

impl LedgerRepositoryImpl {
    pub(crate) fn new(
        storage: Arc<dyn StorageDatasource>,
        fiscal_year: i32,
        events: broadcast::Sender<StoreEvent>,
    ) -> Self {
        Self {
            storage,
            fiscal_year,
            events,
            lock: Mutex::new(()),
        }
    }

    /// Never fails: storage problems are logged, and the generated seed is
    /// served instead without overwriting what is stored.
    async fn load_unlocked(&self) -> Vec<LedgerEntry> {
        let seed = seed_entries();
        let hash = seed_hash(&seed);

        let stored = match self.read_stored(&hash).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = ?e, "failed to read stored entries, falling back to seed data");
                return self.reconcile(seed).0;
            }
        };

        let (entries, reseeded) = match stored {
            Stored::Current(entries) => (entries, false),
            Stored::Missing => {
                info!(count = seed.len(), version = SEED_VERSION, "initializing storage with seed data");
                (seed, true)
            }
            Stored::Stale(stored) => {
                let seed_ids: HashSet<&EntryId> = seed.iter().map(|e| &e.id).collect();
                let mut entries: Vec<LedgerEntry> = stored
                    .into_iter()
                    .filter(|e| !seed_ids.contains(&e.id))
                    .collect();
                info!(
                    user_entries = entries.len(),
                    version = SEED_VERSION,
                    "seed data changed, reseeding and keeping user entries"
                );
                entries.extend(seed);
                (entries, true)
            }
        };

        let (entries, removed) = self.reconcile(entries);
        if removed > 0 {
            warn!(removed, year = self.fiscal_year, "removed entries outside the fiscal year");
        }
        if reseeded || removed > 0 {
            if let Err(e) = self.persist(&entries, reseeded.then_some(hash.as_str())).await {
                error!(error = ?e, "failed to persist reconciled entries");
            }
        }
        entries
    }

    async fn read_stored(&self, current_hash: &str) -> Result<Stored, ServerError> {
        let Some(json) = self.storage.get(ENTRIES_KEY).await? else {
            return Ok(Stored::Missing);
        };
        let entries: Vec<LedgerEntry> = serde_json::from_str::<Vec<LedgerEntryModel>>(&json)
            .map_err(|e| InvalidJson::with_debug("stored entries", &e))?
            .into_iter()
            .map(Into::into)
            .collect();

        let (version, hash) = futures::try_join!(
            self.storage.get(ENTRIES_VERSION_KEY),
            self.storage.get(ENTRIES_HASH_KEY)
        )?;
        if version.as_deref() == Some(SEED_VERSION) && hash.as_deref() == Some(current_hash) {
            Ok(Stored::Current(entries))
        } else {
            Ok(Stored::Stale(entries))
        }
    }

    /// Drops entries whose due date does not parse or falls outside the
    /// fiscal year. Returns the kept entries and how many were dropped.
    fn reconcile(&self, mut entries: Vec<LedgerEntry>) -> (Vec<LedgerEntry>, usize) {
        let before = entries.len();
        entries.retain(|e| e.due().map_or(false, |due| due.year() == self.fiscal_year));
        let removed = before - entries.len();
        (entries, removed)
    }

    /// Writes the entries, plus the seed version and hash when given.
    async fn persist(&self, entries: &[LedgerEntry], seed_hash: Option<&str>) -> Result<(), ServerError> {
        self.write_entries(entries).await?;
        if let Some(hash) = seed_hash {
            self.storage.set(ENTRIES_VERSION_KEY, SEED_VERSION).await?;
            self.storage.set(ENTRIES_HASH_KEY, hash).await?;
        }
        Ok(())
    }

    async fn write_entries(&self, entries: &[LedgerEntry]) -> Result<(), ServerError> {
        let models: Vec<LedgerEntryModel> = entries.iter().map(Into::into).collect();
        let json = serde_json::to_string(&models)
            .map_err(|e| InvalidJson::with_debug("entries", &e))?;
        self.storage.set(ENTRIES_KEY, &json).await
    }
}
