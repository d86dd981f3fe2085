//! Certificate-of-deposit book fixture.

use super::lcg::Lcg;
use chrono::{Datelike, Months, NaiveDate};
use glimpsy_core::{Dataset, Row};

/// Rows in the default finance fixture.
pub const FINANCE_ROWS: usize = 1000;

const BANKS: [&str; 24] = [
    "Chase Bank",
    "Bank of America",
    "Wells Fargo",
    "Citibank",
    "US Bank",
    "PNC Bank",
    "Capital One",
    "TD Bank",
    "Goldman Sachs",
    "Morgan Stanley",
    "American Express Bank",
    "Ally Bank",
    "Marcus by Goldman Sachs",
    "Discover Bank",
    "Synchrony Bank",
    "Barclays Bank",
    "HSBC Bank",
    "Citizens Bank",
    "Regions Bank",
    "Fifth Third Bank",
    "KeyBank",
    "BB&T Bank",
    "SunTrust Bank",
    "Huntington Bank",
];

const CD_TYPES: [&str; 5] = [
    "Traditional CD",
    "Jumbo CD",
    "Bump-up CD",
    "Step-up CD",
    "Liquid CD",
];

const TERMS: [u32; 8] = [3, 6, 12, 18, 24, 36, 48, 60];

const COLUMNS: [&str; 21] = [
    "id",
    "account_number",
    "customer_type",
    "customer_segment",
    "bank_name",
    "cd_type",
    "origination_date",
    "maturity_date",
    "term_months",
    "principal_amount",
    "interest_rate",
    "interest_earned",
    "total_value",
    "status",
    "early_withdrawal_penalty",
    "apy",
    "days_to_maturity",
    "origination_year",
    "origination_month",
    "maturity_year",
    "maturity_month",
];

fn base_rate(term: u32) -> f64 {
    match term {
        3 => 0.5,
        6 => 1.0,
        18 => 1.8,
        24 => 2.0,
        36 => 2.2,
        48 => 2.3,
        60 => 2.4,
        _ => 1.5,
    }
}

/// Rate in percent: term base, +0.1 per year since 2020, +/-0.25 noise,
/// floored at 0.1.
fn interest_rate(rng: &mut Lcg, term: u32, year: i32) -> f64 {
    let year_adjustment = f64::from(year - 2020) * 0.1;
    let noise = (rng.next_f64() - 0.5) * 0.5;
    (base_rate(term) + year_adjustment + noise).max(0.1)
}

/// Principal drawn from four tiers between $10k and $1.5M.
fn principal_amount(rng: &mut Lcg) -> f64 {
    let tier = rng.next_f64();
    let (span, floor) = if tier < 0.4 {
        (50_000, 10_000)
    } else if tier < 0.7 {
        (100_000, 50_000)
    } else if tier < 0.9 {
        (500_000, 100_000)
    } else {
        (1_000_000, 500_000)
    };
    rng.int(span, floor) as f64
}

fn customer_segment(principal: f64) -> &'static str {
    if principal < 50_000.0 {
        "Standard"
    } else if principal < 250_000.0 {
        "Premium"
    } else if principal < 1_000_000.0 {
        "High Net Worth"
    } else {
        "Ultra High Net Worth"
    }
}

fn account_number(rng: &mut Lcg) -> String {
    let prefix = rng.int(900, 100);
    let middle = rng.int(9000, 1000);
    let suffix = rng.int(9000, 1000);
    format!("{prefix}-{middle}-{suffix}")
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn account(rng: &mut Lcg, id: usize, today: NaiveDate) -> Option<Row> {
    let year = if rng.next_f64() > 0.6 {
        2024
    } else {
        2020 + rng.int(5, 0) as i32
    };
    let month = rng.int(12, 1) as u32;
    let day = rng.int(28, 1) as u32;
    let origination = NaiveDate::from_ymd_opt(year, month, day)?;

    let term = *rng.pick(&TERMS);
    let maturity = origination.checked_add_months(Months::new(term))?;

    let rate = interest_rate(rng, term, year);
    let principal = principal_amount(rng);
    let interest = principal * rate * f64::from(term) / 12.0 / 100.0;

    let status = if maturity < today {
        if rng.next_f64() > 0.4 {
            "Matured"
        } else {
            "Rolled Over"
        }
    } else if rng.next_f64() > 0.98 {
        "Early Withdrawal"
    } else {
        "Active"
    };

    let account_number = account_number(rng);
    let customer_type = if rng.next_f64() > 0.3 {
        "Personal"
    } else {
        "Business"
    };
    let bank = if rng.next_f64() > 0.4 {
        "Citibank"
    } else {
        *rng.pick(&BANKS)
    };
    let cd_type = *rng.pick(&CD_TYPES);

    let apy = (1.0 + rate / 100.0).powi(12) - 1.0;
    let days_to_maturity = (maturity - today).num_days().max(0);

    Some(
        Row::new()
            .with("id", id as i64)
            .with("account_number", account_number)
            .with("customer_type", customer_type)
            .with("customer_segment", customer_segment(principal))
            .with("bank_name", bank)
            .with("cd_type", cd_type)
            .with("origination_date", origination)
            .with("maturity_date", maturity)
            .with("term_months", term)
            .with("principal_amount", round_to(principal, 2))
            .with("interest_rate", round_to(rate, 4))
            .with("interest_earned", round_to(interest, 2))
            .with("total_value", round_to(principal + interest, 2))
            .with("status", status)
            .with("early_withdrawal_penalty", round_to(principal * 0.03, 2))
            .with("apy", round_to(apy, 4))
            .with("days_to_maturity", days_to_maturity)
            .with("origination_year", year)
            .with("origination_month", month)
            .with("maturity_year", maturity.year())
            .with("maturity_month", maturity.month()),
    )
}

/// Generates `rows` CD accounts. `today` decides status and days to
/// maturity, so the output is fully determined by `(rows, today)`.
#[must_use]
pub fn finance_dataset(rows: usize, today: NaiveDate) -> Dataset {
    let mut rng = Lcg::demo();
    let data: Vec<Row> = (1..=rows)
        .filter_map(|id| account(&mut rng, id, today))
        .collect();
    let columns = COLUMNS.iter().map(|c| (*c).to_string()).collect();
    // Column names are fixed and distinct.
    Dataset::new(columns, data).unwrap_or_default()
}
