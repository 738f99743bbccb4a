#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerSummary {
    /// Sum of positive amounts.
    pub inflows: f64,
    /// Sum of the absolute value of negative amounts.
    pub outflows: f64,
    pub result: f64,
    pub open: usize,
    pub completed: usize,
    pub overdue: usize,
}
