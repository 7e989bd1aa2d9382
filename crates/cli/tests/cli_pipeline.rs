use aqi_forecast::{
    aqi, predict, run, train, AppConfig, Command, CsvObservationSource, JsonModelLoader,
};
use aqi_index::{Pollutant, SeverityTier};
use data_validator::{OzoneUnit, ValidationError};
use inference_engine::{InferenceError, ModelLoader};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("aqi-forecast-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_csv(dir: &Path, days: u32) -> PathBuf {
    let mut csv = String::from("date,pm25,o3,temperature,wind_speed,precipitation\n");
    let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    for i in 0..days {
        let date = start + chrono::Days::new(u64::from(i));
        // Leave a few cells empty to exercise filling
        let pm25 = if i % 9 == 4 {
            String::new()
        } else {
            format!("{:.1}", 8.0 + f64::from(i % 13))
        };
        let precipitation = if i == 0 {
            String::new()
        } else {
            format!("{:.2}", f64::from(i % 3) * 0.1)
        };
        writeln!(
            csv,
            "{},{},{},{},{},{}",
            date,
            pm25,
            30 + i % 20,
            10 + i % 15,
            3,
            precipitation
        )
        .unwrap();
    }
    let path = dir.join("observations.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

#[test]
fn csv_source_fills_empty_cells() {
    let dir = scratch_dir("source");
    let path = write_csv(&dir, 10);

    let raw = CsvObservationSource::new(&path, OzoneUnit::Ppb).read_raw().unwrap();
    assert_eq!(raw.len(), 10);
    assert_eq!(raw[4].pm25, None);
    assert_eq!(raw[0].precipitation, None);

    let obs = CsvObservationSource::new(&path, OzoneUnit::Ppb).observations().unwrap();
    assert_eq!(obs[4].pm25, obs[3].pm25);
    assert_eq!(obs[0].precipitation, obs[1].precipitation);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn train_then_predict_round_trip() {
    let dir = scratch_dir("pipeline");
    let csv = write_csv(&dir, 60);
    let model_path = dir.join("models").join("model.json");
    let config = AppConfig::default();

    let report = train(&config, &csv, &model_path).unwrap();
    assert_eq!(report.validation_rows, 14);
    assert_eq!(report.train_rows, 44);
    assert!(model_path.exists());

    let forecast = predict(&config, &csv, &model_path).unwrap();
    assert_eq!(
        forecast.date,
        chrono::NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
    );
    assert_eq!(forecast.category, aqi_index::AqiCategory::from_aqi(forecast.predicted_aqi));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_model_is_unavailable() {
    let loader = JsonModelLoader::new("/nonexistent/aqi-model.json");
    assert!(matches!(
        loader.load(),
        Err(InferenceError::RegressorUnavailable(_))
    ));
}

#[test]
fn aqi_command_converts_ppm_ozone() {
    let config = AppConfig {
        ozone_unit: OzoneUnit::Ppm,
        ..AppConfig::default()
    };

    let result = aqi(&config, 40.5, 0.065).unwrap();
    assert_eq!(result.value, 113);
    assert_eq!(result.dominant_pollutant, Pollutant::Pm25);
    assert_eq!(result.severity_tier, SeverityTier::Unhealthy);

    // 0.09 ppm is 90 ppb, which outranks a clean PM2.5 reading
    let result = aqi(&config, 5.0, 0.09).unwrap();
    assert_eq!(result.dominant_pollutant, Pollutant::Ozone);

    assert!(run(Command::Aqi { pm25: 40.5, o3: 0.065 }, &config).is_ok());
    assert!(run(Command::Aqi { pm25: -1.0, o3: 0.065 }, &config).is_err());
}

#[test]
fn csv_without_ozone_column_is_rejected() {
    let dir = scratch_dir("columns");
    let path = dir.join("observations.csv");
    std::fs::write(
        &path,
        "date,pm25,temperature,wind_speed,precipitation\n2024-03-01,8.0,10,3,0\n",
    )
    .unwrap();

    let err = CsvObservationSource::new(&path, OzoneUnit::Ppb)
        .read_raw()
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::MissingField("o3"))
    );

    std::fs::remove_dir_all(&dir).unwrap();
}
