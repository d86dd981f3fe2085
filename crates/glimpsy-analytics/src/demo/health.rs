//! Public health fixture.

use super::lcg::Lcg;
use glimpsy_core::{Dataset, Row};

/// Rows in the default health fixture.
pub const HEALTH_ROWS: usize = 150;

const CONDITIONS: [&str; 6] = [
    "Diabetes",
    "Hypertension",
    "Asthma",
    "Heart Disease",
    "Cancer",
    "Obesity",
];
const AGE_GROUPS: [&str; 6] = ["18-25", "26-35", "36-45", "46-55", "56-65", "65+"];
const GENDERS: [&str; 3] = ["Male", "Female", "Other"];
const SEVERITIES: [&str; 4] = ["Low", "Medium", "High", "Critical"];
const COLUMNS: [&str; 9] = [
    "id",
    "date",
    "condition",
    "age_group",
    "gender",
    "severity",
    "cases",
    "mortality_rate",
    "recovery_rate",
];

/// Generates `rows` health records, twelve per month.
#[must_use]
pub fn health_dataset(rows: usize) -> Dataset {
    let mut rng = Lcg::demo();
    let data: Vec<Row> = (0..rows)
        .map(|i| {
            let cases = rng.int(100, 10);
            let mortality_rate = rng.next_f64() * 0.1;
            let recovery_rate = 0.7 + rng.next_f64() * 0.3;
            Row::new()
                .with("id", (i + 1) as i64)
                .with("date", format!("2024-{:02}-{:02}", i / 12 + 1, i % 28 + 1))
                .with("condition", CONDITIONS[i % CONDITIONS.len()])
                .with("age_group", AGE_GROUPS[i % AGE_GROUPS.len()])
                .with("gender", GENDERS[i % GENDERS.len()])
                .with("severity", SEVERITIES[i % SEVERITIES.len()])
                .with("cases", cases)
                .with("mortality_rate", mortality_rate)
                .with("recovery_rate", recovery_rate)
        })
        .collect();
    let columns = COLUMNS.iter().map(|c| (*c).to_string()).collect();
    Dataset::new(columns, data).unwrap_or_default()
}
