//! Dashboard session state.
//!
//! The session is a value: [`DashboardState::reduce`] consumes the current
//! state and an [`Action`] and returns the next state. Everything shown on
//! screen is derived from the state by [`DashboardState::view`].

use crate::derived::{recalculate, Portfolio, RateAdjustment, RateFields};
use crate::filter::{filter_dataset, FilterSet};
use crate::summary::{summarize, ColumnSummary, FilterStats};
use crate::table::{search, Paginator, TablePage};
use crate::types::PipelineConfig;
use glimpsy_core::{Dataset, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Something the user did.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the dataset, resetting the view and the rate adjustment.
    Load(Dataset),
    /// Replace the active filters.
    ApplyFilters(FilterSet),
    /// Drop all filters.
    ClearFilters,
    /// Set the table search term.
    Search(String),
    /// Move to the next table page.
    NextPage,
    /// Move to the previous table page.
    PrevPage,
    /// Shift the rate adjustment by a number of basis points.
    AdjustRate(i32),
    /// Return the rate adjustment to zero.
    ResetRate,
    /// Choose which dataset is shown.
    SelectPortfolio(Portfolio),
}

/// Everything the dashboard shows for the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Portfolio on screen.
    pub portfolio: Portfolio,
    /// Current rate adjustment.
    pub adjustment: RateAdjustment,
    /// Rows kept by the filters out of the active dataset.
    pub stats: FilterStats,
    /// Current table page after search.
    pub page: TablePage,
}

/// Dashboard session state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    config: PipelineConfig,
    fields: RateFields,
    base: Dataset,
    adjusted: Option<Dataset>,
    portfolio: Portfolio,
    adjustment: RateAdjustment,
    filters: FilterSet,
    search: String,
    page: usize,
}

impl DashboardState {
    /// Creates an empty session.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            fields: RateFields::default(),
            base: Dataset::default(),
            adjusted: None,
            portfolio: Portfolio::Original,
            adjustment: RateAdjustment::default(),
            filters: FilterSet::default(),
            search: String::new(),
            page: 1,
        }
    }

    /// Uses different column names for rate adjustment.
    #[must_use]
    pub fn with_rate_fields(mut self, fields: RateFields) -> Self {
        self.fields = fields;
        self
    }

    /// Produces the next state.
    #[must_use]
    pub fn reduce(self, action: Action) -> Self {
        debug!(action = action_name(&action), "dashboard action");
        match action {
            Action::Load(dataset) => {
                let adjustment = RateAdjustment::default();
                let adjusted = self.adjusted_for(&dataset, adjustment);
                Self {
                    base: dataset,
                    adjusted,
                    adjustment,
                    portfolio: Portfolio::Original,
                    filters: FilterSet::default(),
                    search: String::new(),
                    page: 1,
                    ..self
                }
            }
            Action::ApplyFilters(filters) => Self {
                filters,
                page: 1,
                ..self
            },
            Action::ClearFilters => Self {
                filters: FilterSet::default(),
                search: String::new(),
                page: 1,
                ..self
            },
            Action::Search(term) => Self {
                search: term,
                page: 1,
                ..self
            },
            Action::NextPage => {
                let page = self.paginator().next(self.page, self.table_rows().len());
                Self { page, ..self }
            }
            Action::PrevPage => {
                let page = self.paginator().prev(self.page, self.table_rows().len());
                Self { page, ..self }
            }
            Action::AdjustRate(delta) => {
                if !self.supports_adjustment() {
                    debug!("dataset has no rate fields, adjustment ignored");
                    return self;
                }
                let adjustment = self.adjustment.shift(delta);
                self.with_adjustment(adjustment)
            }
            Action::ResetRate => {
                if !self.supports_adjustment() {
                    return self;
                }
                let adjustment = self.adjustment.reset();
                self.with_adjustment(adjustment)
            }
            Action::SelectPortfolio(portfolio) => Self {
                portfolio,
                page: 1,
                ..self
            },
        }
    }

    fn with_adjustment(self, adjustment: RateAdjustment) -> Self {
        let adjusted = self.adjusted_for(&self.base, adjustment);
        Self {
            adjustment,
            adjusted,
            page: 1,
            ..self
        }
    }

    fn adjusted_for(&self, dataset: &Dataset, adjustment: RateAdjustment) -> Option<Dataset> {
        self.fields
            .applies_to(dataset)
            .then(|| recalculate(dataset, adjustment, &self.fields, &self.config))
    }

    fn paginator(&self) -> Paginator {
        Paginator::new(self.config.page_size)
    }

    /// True if the loaded dataset carries principal, rate and term columns.
    #[must_use]
    pub fn supports_adjustment(&self) -> bool {
        self.fields.applies_to(&self.base)
    }

    /// The dataset as loaded.
    #[must_use]
    pub fn base(&self) -> &Dataset {
        &self.base
    }

    /// The dataset currently on screen.
    ///
    /// Falls back to the base dataset when no adjusted version exists.
    #[must_use]
    pub fn active(&self) -> &Dataset {
        match (self.portfolio, &self.adjusted) {
            (Portfolio::Adjusted, Some(adjusted)) => adjusted,
            _ => &self.base,
        }
    }

    /// Selected portfolio.
    #[must_use]
    pub fn portfolio(&self) -> Portfolio {
        self.portfolio
    }

    /// Current rate adjustment.
    #[must_use]
    pub fn adjustment(&self) -> RateAdjustment {
        self.adjustment
    }

    /// Active filters.
    #[must_use]
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Current 1-based page number.
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page
    }

    /// The active dataset narrowed by the filters.
    #[must_use]
    pub fn filtered(&self) -> Dataset {
        filter_dataset(self.active(), &self.filters, &self.config)
    }

    /// Filtered rows narrowed by the search term.
    #[must_use]
    pub fn table_rows(&self) -> Vec<Row> {
        search(self.filtered().rows(), &self.search)
    }

    /// Summary of one column over the filtered rows.
    #[must_use]
    pub fn summary(&self, column: &str) -> Option<ColumnSummary> {
        summarize(self.filtered().rows(), column, &self.config)
    }

    /// Derives what the dashboard shows.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        let filtered = self.filtered();
        let rows = search(filtered.rows(), &self.search);
        DashboardView {
            portfolio: self.portfolio,
            adjustment: self.adjustment,
            stats: FilterStats::new(self.active().row_count(), filtered.row_count()),
            page: self.paginator().page(&rows, self.page),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Load(_) => "load",
        Action::ApplyFilters(_) => "apply_filters",
        Action::ClearFilters => "clear_filters",
        Action::Search(_) => "search",
        Action::NextPage => "next_page",
        Action::PrevPage => "prev_page",
        Action::AdjustRate(_) => "adjust_rate",
        Action::ResetRate => "reset_rate",
        Action::SelectPortfolio(_) => "select_portfolio",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DateRange, FilterDescriptor};
    use approx::assert_relative_eq;

    fn cd_book(n: usize) -> Dataset {
        let rows = (0..n)
            .map(|i| {
                Row::new()
                    .with("principal_amount", 10_000.0)
                    .with("interest_rate", 2.0)
                    .with("term_months", 12.0)
                    .with("status", if i % 2 == 0 { "Active" } else { "Matured" })
            })
            .collect();
        Dataset::new(
            vec![
                "principal_amount".into(),
                "interest_rate".into(),
                "term_months".into(),
                "status".into(),
            ],
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_load_and_view() {
        let state = DashboardState::default().reduce(Action::Load(cd_book(25)));
        let view = state.view();
        assert_eq!(view.stats.total, 25);
        assert_eq!(view.stats.filtered, 25);
        assert_eq!(view.page.number, 1);
        assert_eq!(view.page.page_count, 3);
        assert_eq!(view.page.rows.len(), 10);
    }

    #[test]
    fn test_paging_clamps() {
        let state = DashboardState::default()
            .reduce(Action::Load(cd_book(25)))
            .reduce(Action::NextPage)
            .reduce(Action::NextPage)
            .reduce(Action::NextPage);
        assert_eq!(state.page_number(), 3);
        let state = state.reduce(Action::PrevPage);
        assert_eq!(state.page_number(), 2);
        let state = state.reduce(Action::Search("matured".into()));
        assert_eq!(state.page_number(), 1);
        assert_eq!(state.view().page.total_rows, 12);
    }

    #[test]
    fn test_filters_and_clear() {
        let filters = FilterSet::new(
            DateRange::default(),
            vec![FilterDescriptor::categorical("status", ["Active"])],
        );
        let state = DashboardState::default()
            .reduce(Action::Load(cd_book(10)))
            .reduce(Action::ApplyFilters(filters));
        let stats = state.view().stats;
        assert_eq!(stats.filtered, 5);
        assert_relative_eq!(stats.filtered_pct, 50.0);

        let state = state.reduce(Action::ClearFilters);
        assert_eq!(state.view().stats.filtered, 10);
    }

    #[test]
    fn test_adjustment_and_portfolio() {
        let state = DashboardState::default()
            .reduce(Action::Load(cd_book(4)))
            .reduce(Action::AdjustRate(100));
        assert_eq!(state.adjustment().bps(), 100);

        // Original still on screen until the adjusted portfolio is selected
        assert_relative_eq!(state.summary("interest_rate").unwrap().avg, 2.0);

        let state = state.reduce(Action::SelectPortfolio(Portfolio::Adjusted));
        assert_relative_eq!(state.summary("interest_rate").unwrap().avg, 3.0);
        assert_relative_eq!(state.summary("interest_earned").unwrap().avg, 300.0, epsilon = 1e-9);
        assert_relative_eq!(state.base().rows()[0].number("interest_rate").unwrap(), 2.0);

        let state = state.reduce(Action::ResetRate);
        assert!(state.adjustment().is_zero());
        assert_relative_eq!(state.summary("interest_rate").unwrap().avg, 2.0);
    }

    #[test]
    fn test_adjustment_ignored_without_rate_fields() {
        let ds = Dataset::from_rows(vec![Row::new().with("x", 1.0)]);
        let state = DashboardState::default()
            .reduce(Action::Load(ds))
            .reduce(Action::AdjustRate(50))
            .reduce(Action::SelectPortfolio(Portfolio::Adjusted));
        assert!(state.adjustment().is_zero());
        assert!(!state.supports_adjustment());
        assert_eq!(state.active().row_count(), 1);
    }

    #[test]
    fn test_load_resets_view_state() {
        let state = DashboardState::default()
            .reduce(Action::Load(cd_book(30)))
            .reduce(Action::Search("active".into()))
            .reduce(Action::AdjustRate(100))
            .reduce(Action::SelectPortfolio(Portfolio::Adjusted))
            .reduce(Action::Load(cd_book(3)));
        assert_eq!(state.portfolio(), Portfolio::Original);
        assert!(state.search_term().is_empty());
        assert!(state.filters().descriptors.is_empty());
        assert!(state.adjustment().is_zero());

        let state = state.reduce(Action::SelectPortfolio(Portfolio::Adjusted));
        assert_relative_eq!(state.summary("interest_rate").unwrap().avg, 2.0);
    }
}
