// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod config_datasource;
        pub(crate) mod storage_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod custom_category_model;
        pub(crate) mod ledger_entry_model;
        pub(crate) mod query_params_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod categories_repository_impl;
        pub(crate) mod ledger_repository_impl;
        pub(crate) mod session_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod category;
        pub(crate) mod config;
        pub(crate) mod dre;
        pub(crate) mod entry_draft;
        pub(crate) mod export;
        pub(crate) mod filter;
        pub(crate) mod ledger_entry;
        pub(crate) mod store_event;
        pub(crate) mod summary;
    }
    pub(crate) mod logic {
        pub(crate) mod dre_aggregator;
        pub(crate) mod entry_builder;
        pub(crate) mod ledger_filter;
        pub(crate) mod seed_data;
        pub(crate) mod summarizer;
        pub(crate) mod taxonomy;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod categories_repository;
        pub(crate) mod ledger_repository;
        pub(crate) mod session_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod categories_usecase;
        pub(crate) mod ledger_usecase;
        pub(crate) mod report_usecase;
        pub(crate) mod session_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod currency_fmt;
    pub(crate) mod dre_printer;
    pub(crate) mod ledger_exporter;
    pub(crate) mod ledger_printer;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::category::*;
        pub use crate::domain::entities::config::*;
        pub use crate::domain::entities::dre::*;
        pub use crate::domain::entities::entry_draft::*;
        pub use crate::domain::entities::export::*;
        pub use crate::domain::entities::filter::*;
        pub use crate::domain::entities::ledger_entry::*;
        pub use crate::domain::entities::store_event::*;
        pub use crate::domain::entities::summary::*;
    }

    pub mod storage {
        pub use crate::data::datasources::storage_datasource::{
            FileStorageDatasourceImpl, MemoryStorageDatasourceImpl, StorageDatasource,
        };
    }

    pub mod taxonomy {
        pub use crate::domain::logic::taxonomy::{
            all_subcategories, base_categories, categories_with_custom, category_label,
            category_label_with_custom, contact_label, form_contact_label,
            normalize_category_value, UNIDENTIFIED_CONTACT,
        };
    }

    pub mod seed {
        pub use crate::domain::logic::seed_data::{seed_entries, seed_hash, SEED_VERSION};
    }
}
