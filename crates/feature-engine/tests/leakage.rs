use chrono::{Days, NaiveDate};
use data_validator::DailyObservation;
use feature_engine::{FeatureEngineer, FeatureSchema, ROLLING_WINDOW};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn build(pm25: &[f64], temperature: &[f64]) -> Vec<DailyObservation> {
    let start = NaiveDate::from_ymd_opt(2023, 12, 20).unwrap();
    pm25.iter()
        .zip(temperature)
        .enumerate()
        .map(|(i, (&pm25, &temperature))| DailyObservation {
            date: start + Days::new(i as u64),
            pm25,
            o3: 20.0 + i as f64,
            temperature,
            wind_speed: 2.0 + (i % 3) as f64,
            precipitation: 0.0,
        })
        .collect()
}

#[test]
fn ten_day_rolling_means_use_previous_seven_days_only() {
    let pm25 = [5.0, 7.0, 9.0, 11.0, 13.0, 15.0, 17.0, 19.0, 21.0, 23.0];
    let temperature = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let obs = build(&pm25, &temperature);
    let rows = FeatureEngineer::default().training_rows(&obs).unwrap();

    // Days 7 and 8 have a full lagged window.
    let day7 = rows.iter().find(|r| r.date() == obs[7].date).unwrap();
    assert_eq!(day7.features.rolling.pm25, (5.0 + 7.0 + 9.0 + 11.0 + 13.0 + 15.0 + 17.0) / 7.0);
    assert_eq!(day7.features.rolling.temperature, 4.0);

    let day8 = rows.iter().find(|r| r.date() == obs[8].date).unwrap();
    assert_eq!(day8.features.rolling.pm25, 13.0);
    assert_eq!(day8.features.rolling.temperature, 5.0);

    // Partial windows at the series start
    assert_eq!(rows[0].features.rolling.pm25, 5.0);
    assert_eq!(rows[1].features.rolling.pm25, 6.0);
}

#[test]
fn year_boundary_calendar_fields() {
    let obs = build(&[10.0; 16], &[0.0; 16]);
    let rows = FeatureEngineer::default().training_rows(&obs).unwrap();
    let jan_1 = rows
        .iter()
        .find(|r| r.date() == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .unwrap();
    assert_eq!(jan_1.features.calendar.month, 1);
    assert_eq!(jan_1.features.calendar.day_of_year, 1);
    // 2024-01-01 was a Monday
    assert_eq!(jan_1.features.calendar.weekday, 0);
}

#[test]
fn training_rows_project_onto_current_schema() {
    let obs = build(&[10.0; 12], &[3.0; 12]);
    let schema = FeatureSchema::current();
    for row in FeatureEngineer::default().training_rows(&obs).unwrap() {
        let projected = schema.project(&row.features).unwrap();
        assert_eq!(projected.len(), schema.len());
    }
}

proptest! {
    #![proptest_config(Config::with_cases(64))]

    #[test]
    fn rolling_mean_equals_mean_of_prior_days(
        values in proptest::collection::vec(0.0f64..300.0, 8..40),
    ) {
        let temperature: Vec<f64> = values.iter().map(|v| v / 10.0).collect();
        let obs = build(&values, &temperature);
        let rows = FeatureEngineer::default().training_rows(&obs).unwrap();

        for row in rows {
            let d = obs.iter().position(|o| o.date == row.date()).unwrap();
            let window = &values[d.saturating_sub(ROLLING_WINDOW)..d];
            let expected = window.iter().sum::<f64>() / window.len() as f64;
            prop_assert!((row.features.rolling.pm25 - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn changing_a_day_never_changes_its_own_rolling_mean(
        values in proptest::collection::vec(0.0f64..300.0, 9..30),
        bump in 1.0f64..100.0,
        pick in 1usize..8,
    ) {
        let temperature = vec![0.0; values.len()];
        let obs = build(&values, &temperature);
        let mut changed = obs.clone();
        changed[pick].pm25 += bump;

        let engineer = FeatureEngineer::default();
        let before = engineer.training_rows(&obs).unwrap();
        let after = engineer.training_rows(&changed).unwrap();
        let b = before.iter().find(|r| r.date() == obs[pick].date).unwrap();
        let a = after.iter().find(|r| r.date() == obs[pick].date).unwrap();
        prop_assert_eq!(b.features.rolling.pm25, a.features.rolling.pm25);
        prop_assert!(a.features.pm25 > b.features.pm25);
    }
}
