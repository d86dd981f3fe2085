//! Retail sales fixture.

use super::lcg::Lcg;
use glimpsy_core::{Dataset, Row};

/// Rows in the default sales fixture.
pub const SALES_ROWS: usize = 120;

const CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Books", "Home & Garden", "Sports"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const COLUMNS: [&str; 7] = ["id", "date", "category", "product", "revenue", "units", "region"];

/// Generates `rows` sales records, ten per month.
///
/// Dates are built positionally and are not calendar-checked, matching
/// the dashboard's fixture (`2024-02-30` occurs).
#[must_use]
pub fn sales_dataset(rows: usize) -> Dataset {
    let mut rng = Lcg::demo();
    let data: Vec<Row> = (0..rows)
        .map(|i| {
            let revenue = rng.int(10_000, 1000);
            let units = rng.int(100, 10);
            Row::new()
                .with("id", (i + 1) as i64)
                .with("date", format!("2024-{:02}-{:02}", i / 10 + 1, i % 30 + 1))
                .with("category", CATEGORIES[i % CATEGORIES.len()])
                .with("product", format!("Product {}", i + 1))
                .with("revenue", revenue)
                .with("units", units)
                .with("region", REGIONS[i % REGIONS.len()])
        })
        .collect();
    let columns = COLUMNS.iter().map(|c| (*c).to_string()).collect();
    Dataset::new(columns, data).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_fixture() {
        let ds = sales_dataset(SALES_ROWS);
        assert_eq!(ds.row_count(), 120);
        let first = &ds.rows()[0];
        assert_eq!(first.display("date"), "2024-01-01");
        assert_eq!(first.display("category"), "Electronics");
        assert_eq!(ds.rows()[119].display("date"), "2024-12-30");
        assert_eq!(ds.rows()[119].display("product"), "Product 120");

        for row in ds.rows() {
            let revenue = row.number("revenue").unwrap();
            assert!((1000.0..11_000.0).contains(&revenue));
            let units = row.number("units").unwrap();
            assert!((10.0..110.0).contains(&units));
        }
        assert_eq!(sales_dataset(20), sales_dataset(20));
    }
}
