/// Change notification published by the repositories after each write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    EntriesUpdated,
    CategoriesUpdated,
}
