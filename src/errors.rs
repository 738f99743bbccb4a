use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading '{key}' from storage.", { key: &str });
define_client_error!(WriteError, "Error writing '{key}' to storage.", { key: &str });
define_client_error!(ReadConfigError, "Error reading config file '{path}'.", { path: &str });

// Parsing-related.
define_client_error!(InvalidJson, "Invalid {json_type} (invalid JSON format).", { json_type: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidBrDate, "Invalid date '{date}', expected DD/MM/YYYY.", { date: &str });
define_client_error!(
    InvalidQueryParameter,
    "Invalid value '{value}' for query parameter '{param}'.",
    { param: &str, value: &str }
);

// Ledger-related.
define_client_error!(
    EntryOutsideFiscalYear,
    "Only entries from {year} are allowed (received due date '{due_date}').",
    { year: i32, due_date: &str }
);
define_client_error!(
    MissingRequiredFields,
    "Missing required fields: {fields}.",
    { fields: &str }
);
define_client_error!(InvalidAmount, "Invalid amount: '{value}'.", { value: &str });

// Category-related.
define_client_error!(
    DuplicateCategory,
    "A category with value '{value}' already exists for {direction}.",
    { value: &str, direction: &str }
);
define_client_error!(CategoryNotFound, "Custom category '{id}' not found.", { id: &str });
define_client_error!(
    InvalidCategoryValue,
    "Category value '{value}' must contain only letters, numbers and underscores.",
    { value: &str }
);

// Export-related.
define_internal_error!(ExportFailed, "Failed to export {format} file.", { format: &str });
