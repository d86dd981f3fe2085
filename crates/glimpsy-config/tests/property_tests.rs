//! Property-based tests for settings.

use glimpsy_config::{ConfigStore, SettingKey, Settings, Theme, Validate};
use proptest::prelude::*;

fn arb_theme() -> impl Strategy<Value = Theme> {
    prop::sample::select(Theme::ALL.to_vec())
}

proptest! {
    /// Any positive page size survives set/get.
    #[test]
    fn page_size_round_trips(size in 1usize..10_000) {
        let mut settings = Settings::default();
        settings.set(SettingKey::PageSize, &size.to_string()).unwrap();
        prop_assert_eq!(settings.get(SettingKey::PageSize), size.to_string());
        prop_assert!(settings.is_valid());
    }

    /// Ratios outside [0, 1] are rejected without touching the settings.
    #[test]
    fn out_of_range_ratio_is_rejected(ratio in 1.0001f64..100.0) {
        let mut settings = Settings::default();
        prop_assert!(settings.set(SettingKey::NumericRatio, &ratio.to_string()).is_err());
        prop_assert_eq!(settings, Settings::default());
    }

    /// Theme names parse regardless of case.
    #[test]
    fn theme_parse_ignores_case(theme in arb_theme(), upper in any::<bool>()) {
        let name = if upper { theme.as_str().to_uppercase() } else { theme.to_string() };
        prop_assert_eq!(name.parse::<Theme>().unwrap(), theme);
    }

    /// Whatever is saved loads back identically.
    #[test]
    fn store_round_trips(theme in arb_theme(), precision in 0u8..=10, page in 1usize..500) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        let mut settings = Settings::default();
        settings.theme = theme;
        settings.decimal_precision = precision;
        settings.pipeline.page_size = page;
        store.save(&settings).unwrap();

        prop_assert_eq!(store.load().unwrap(), settings);
    }
}
