use std::io::Cursor;

use crate::dataset::{Column, Dataset, DatasetError, LoadOptions};

use super::assert_close;

const FPING_CSV: &str = "timestamp, host, seq, bytes, ms\n\
                         1700000000.5, 10.0.0.1, 0, 56, 0.456\n\
                         1700000001.5, 10.0.0.1, 1, 56, 1.5\n";

const IPERF_CSV: &str = "timestamp, seconds, bytes\n\
                         100.0, 0.5, 1500000\n\
                         101.0, 0.7, 2500000\n\
                         102.0, 0.2, 500000\n";

fn load(inputs: &[&str], options: &LoadOptions) -> Result<Dataset, DatasetError> {
    Dataset::load(inputs.iter().map(|s| Cursor::new(s.as_bytes())), options)
}

#[test]
fn fping_rows_gain_seconds_and_hour() {
    let ds = load(&[FPING_CSV], &LoadOptions::default()).expect("load");
    assert_eq!(ds.len(), 2);

    let seconds = ds.series("seconds").expect("seconds");
    assert_close(seconds[0], 0.000456, 1e-12);
    assert_close(seconds[1], 0.0015, 1e-12);

    // 1700000000 % 86400 = 80000 -> 22 点
    assert_eq!(ds.series("hour").expect("hour"), &[22.0, 22.0]);
    assert!(matches!(ds.column("host"), Some(Column::Text(_))));
    assert_eq!(
        ds.column_names(),
        [
            "timestamp", "host", "seq", "bytes", "ms", "seconds", "KB", "MB", "bin_kb", "bin_mb",
            "hour"
        ]
    );
}

#[test]
fn hour_window_drops_rows_outside() {
    let options = LoadOptions {
        max_hour: 21,
        ..LoadOptions::default()
    };
    let ds = load(&[FPING_CSV], &options).expect("load");
    assert!(ds.is_empty());
}

#[test]
fn utc_offset_shifts_timestamps_before_hour_window() {
    let options = LoadOptions {
        utc_offset_hours: 2.0,
        min_hour: 0,
        max_hour: 0,
    };
    let ds = load(&[FPING_CSV], &options).expect("load");
    assert_eq!(ds.len(), 2);
    assert_eq!(
        ds.series("timestamp").expect("timestamp"),
        &[1700007200.5, 1700007201.5]
    );
    assert_eq!(ds.series("hour").expect("hour"), &[0.0, 0.0]);
}

#[test]
fn iperf_rows_are_bucketed_by_megabyte() {
    let ds = load(&[IPERF_CSV], &LoadOptions::default()).expect("load");
    assert_eq!(ds.series("bin_mb").expect("bin_mb"), &[1.0, 2.0, 0.0]);

    let one_mb = ds.filter_bucket("bin_mb", 1).expect("filter");
    assert_eq!(one_mb.len(), 1);
    assert_eq!(one_mb.series("seconds").expect("seconds"), &[0.5]);

    let empty = ds.filter_bucket("bin_mb", 10).expect("filter");
    assert!(empty.is_empty());
}

#[test]
fn multiple_inputs_are_concatenated_in_order() {
    let second = "timestamp, seconds, bytes\n103.0, 0.9, 900000\n";
    let ds = load(&[IPERF_CSV, second], &LoadOptions::default()).expect("load");
    assert_eq!(ds.len(), 4);
    assert_eq!(
        ds.series("seconds").expect("seconds"),
        &[0.5, 0.7, 0.2, 0.9]
    );
}

#[test]
fn mismatched_columns_are_rejected() {
    let err = load(&[IPERF_CSV, FPING_CSV], &LoadOptions::default()).expect_err("mismatch");
    assert!(matches!(err, DatasetError::ColumnMismatch { .. }));
}

#[test]
fn missing_timestamp_is_rejected() {
    let err = load(&["seconds, bytes\n0.5, 100\n"], &LoadOptions::default()).expect_err("fail");
    assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "timestamp"));
}

#[test]
fn text_column_is_not_a_series() {
    let ds = load(&[FPING_CSV], &LoadOptions::default()).expect("load");
    let err = ds.series("host").expect_err("text");
    assert!(matches!(err, DatasetError::NotNumeric { .. }));
    assert!(matches!(
        ds.series("nope"),
        Err(DatasetError::MissingColumn(_))
    ));
}

#[test]
fn load_options_deserialize_with_defaults() {
    let opts: LoadOptions = serde_json::from_str(r#"{ "utc_offset_hours": 2 }"#).expect("parse");
    assert_eq!(opts.utc_offset_hours, 2.0);
    assert_eq!(opts.min_hour, 0);
    assert_eq!(opts.max_hour, 24);
}
