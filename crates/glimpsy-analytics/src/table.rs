//! Table view: free-text search and pagination.

use glimpsy_core::Row;
use serde::{Deserialize, Serialize};

/// Keeps rows where any cell contains `term`, ignoring case.
///
/// A blank term keeps every row.
#[must_use]
pub fn search(rows: &[Row], term: &str) -> Vec<Row> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| {
            row.iter()
                .any(|(_, value)| value.display_string().to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// One page of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    /// 1-based page number.
    pub number: usize,
    /// Total pages; at least 1.
    pub page_count: usize,
    /// Rows across all pages.
    pub total_rows: usize,
    /// 1-based index of the first row shown, 0 when there are none.
    pub first_row: usize,
    /// 1-based index of the last row shown, 0 when there are none.
    pub last_row: usize,
    /// Rows on this page.
    pub rows: Vec<Row>,
}

impl TablePage {
    /// True if a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.page_count
    }

    /// True if an earlier page exists.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    /// "Showing x to y of z entries".
    #[must_use]
    pub fn caption(&self) -> String {
        format!(
            "Showing {} to {} of {} entries",
            self.first_row, self.last_row, self.total_rows
        )
    }
}

/// Fixed-size pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Creates a paginator; a zero size is treated as 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Rows per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `len` rows; an empty table has one empty page.
    #[must_use]
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Clamps a page number into `1..=page_count`.
    #[must_use]
    pub fn clamp(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.page_count(len))
    }

    /// The page after `page`, staying on the last page.
    #[must_use]
    pub fn next(&self, page: usize, len: usize) -> usize {
        self.clamp(page.saturating_add(1), len)
    }

    /// The page before `page`, staying on the first page.
    #[must_use]
    pub fn prev(&self, page: usize, len: usize) -> usize {
        self.clamp(page.saturating_sub(1), len)
    }

    /// Slices out one page; out-of-range numbers are clamped.
    #[must_use]
    pub fn page(&self, rows: &[Row], page: usize) -> TablePage {
        let number = self.clamp(page, rows.len());
        let start = (number - 1) * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        let slice = rows.get(start..end).unwrap_or_default();

        TablePage {
            number,
            page_count: self.page_count(rows.len()),
            total_rows: rows.len(),
            first_row: if slice.is_empty() { 0 } else { start + 1 },
            last_row: if slice.is_empty() { 0 } else { end },
            rows: slice.to_vec(),
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(10)
    }
}
