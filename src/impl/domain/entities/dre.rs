use std::collections::{HashMap, HashSet};

use crate::domain::logic::dre_aggregator::LAYOUT;

pub type MonthlyValues = [f64; 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DreGroup {
    OperatingRevenue,
    OperatingExpense,
    SalesMarketingExpense,
    AdministrativeExpense,
    PayrollExpense,
    FinancialRevenue,
    OtherRevenue,
    FinancialExpense,
    Investments,
    IncomeTaxes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DreMetric {
    ContributionMargin,
    Ebitda,
    NetProfit,
}

/// Destination of a category in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DreRoute {
    pub group: DreGroup,
    pub line: &'static str,
}

/// Row of the printed report, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DreRow {
    Group {
        group: DreGroup,
        title: &'static str,
        lines: &'static [&'static str],
    },
    Metric {
        metric: DreMetric,
        title: &'static str,
    },
}

/// Which report rows are expanded, keyed by row title. Groups expand into
/// their sublines, metrics into their share of operating revenue. Rows start
/// collapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DreExpandState {
    expanded: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DreReport {
    pub year: i32,
    pub lines: HashMap<&'static str, MonthlyValues>,
    pub groups: HashMap<DreGroup, MonthlyValues>,
    pub metrics: HashMap<DreMetric, MonthlyValues>,
    /// Entries of the selected year whose category has no report line.
    pub unmapped_entries: usize,
    /// Entries skipped because their due date could not be parsed.
    pub invalid_dates: usize,
}

// --

impl DreGroup {
    pub const ALL: [DreGroup; 10] = [
        DreGroup::OperatingRevenue,
        DreGroup::OperatingExpense,
        DreGroup::SalesMarketingExpense,
        DreGroup::AdministrativeExpense,
        DreGroup::PayrollExpense,
        DreGroup::FinancialRevenue,
        DreGroup::OtherRevenue,
        DreGroup::FinancialExpense,
        DreGroup::Investments,
        DreGroup::IncomeTaxes,
    ];

    /// Expense groups are always reported negative, whatever sign the entry
    /// was stored with. Every other group, investments and income taxes
    /// included, is reported as a positive magnitude.
    pub fn is_expense(&self) -> bool {
        matches!(
            self,
            DreGroup::OperatingExpense
                | DreGroup::SalesMarketingExpense
                | DreGroup::AdministrativeExpense
                | DreGroup::PayrollExpense
                | DreGroup::FinancialExpense
        )
    }
}

impl DreMetric {
    pub const ALL: [DreMetric; 3] = [
        DreMetric::ContributionMargin,
        DreMetric::Ebitda,
        DreMetric::NetProfit,
    ];
}

impl DreRow {
    pub fn title(&self) -> &'static str {
        match self {
            DreRow::Group { title, .. } | DreRow::Metric { title, .. } => *title,
        }
    }

    /// Rows of the report, in display order.
    pub fn layout() -> &'static [DreRow] {
        LAYOUT
    }
}

impl DreExpandState {
    pub fn all_expanded() -> Self {
        Self {
            expanded: LAYOUT.iter().map(|r| r.title().to_string()).collect(),
        }
    }

    pub fn toggle(&mut self, title: &str) {
        if !self.expanded.remove(title) {
            self.expanded.insert(title.to_string());
        }
    }

    pub fn is_expanded(&self, title: &str) -> bool {
        self.expanded.contains(title)
    }
}

impl DreReport {
    pub fn line(&self, line: &str) -> MonthlyValues {
        self.lines.get(line).copied().unwrap_or([0.0; 12])
    }

    pub fn group(&self, group: DreGroup) -> MonthlyValues {
        self.groups.get(&group).copied().unwrap_or([0.0; 12])
    }

    pub fn metric(&self, metric: DreMetric) -> MonthlyValues {
        self.metrics.get(&metric).copied().unwrap_or([0.0; 12])
    }

    /// Share of the month's operating revenue (0 when there is none).
    pub fn percent_of_revenue(&self, values: &MonthlyValues, month: usize) -> f64 {
        let revenue = self.group(DreGroup::OperatingRevenue)[month];
        if revenue == 0.0 {
            0.0
        } else {
            values[month] / revenue
        }
    }

    /// Same as [`DreReport::percent_of_revenue`], over the whole year.
    pub fn annual_percent_of_revenue(&self, values: &MonthlyValues) -> f64 {
        let revenue: f64 = self.group(DreGroup::OperatingRevenue).iter().sum();
        if revenue == 0.0 {
            0.0
        } else {
            values.iter().sum::<f64>() / revenue
        }
    }
}
