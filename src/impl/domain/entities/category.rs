use super::ledger_entry::Direction;

/// Node of the two-level category taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub value: String,
    pub label: String,
    pub subcategories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryId(pub(crate) String);

/// User-defined extension of the taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomCategory {
    pub id: CategoryId,
    pub value: String,
    pub label: String,
    pub direction: Direction,
    /// Id of the custom category this one is nested under, if any.
    pub parent_category: Option<CategoryId>,
    pub is_custom: bool,
}

/// Fields accepted when creating a custom category.
#[derive(Debug, Clone)]
pub struct NewCustomCategory {
    pub value: String,
    pub label: String,
    pub direction: Direction,
    pub parent_category: Option<CategoryId>,
}

/// Partial update of a custom category. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomCategoryPatch {
    pub value: Option<String>,
    pub label: Option<String>,
    pub direction: Option<Direction>,
    pub parent_category: Option<Option<CategoryId>>,
}

/// Flat view of a leaf category, as offered in the category pickers.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub is_custom: bool,
}

// --

impl Category {
    pub fn leaf(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            subcategories: Vec::new(),
        }
    }
}

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
