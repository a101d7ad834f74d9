//! Long-form vs. wide-form detection and the long-form pivot.
//!
//! A chunk is long-form when its header row carries both
//! [`channels::TELEMETRY_NAME_COLUMN`] and one of
//! [`channels::VALUE_COLUMN_ALIASES`]; every other shape is treated as
//! wide-form, where each row is already one sample with one column per
//! channel.

use std::collections::HashMap;
use std::path::Path;

use analytics_errors::stages::IngestError;
use analytics_schemas::channels;

use crate::constants::{CHUNK_ROWS, DEFAULT_VEHICLE_ID};
use crate::timestamp::parse_meta_time;

/// One ingested sample: a single vehicle's telemetry reading at a single
/// timestamp, before resampling onto the 50ms grid.
#[derive(Debug, Clone)]
pub struct RawSample {
    pub timestamp_ms: i64,
    pub vehicle_id: String,
    pub values: HashMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Long,
    Wide,
}

struct HeaderLayout {
    shape: Shape,
    meta_time_idx: usize,
    vehicle_idx: Option<usize>,
    telemetry_name_idx: Option<usize>,
    value_idx: Option<usize>,
    wide_channel_cols: Vec<(usize, String)>,
}

fn layout_for(headers: &csv::StringRecord) -> Result<HeaderLayout, IngestError> {
    let meta_time_idx = headers
        .iter()
        .position(|h| h == channels::META_TIME_COLUMN)
        .ok_or_else(|| IngestError::MissingPivotColumn(channels::META_TIME_COLUMN.to_string()))?;

    let vehicle_idx = channels::VEHICLE_ID_ALIASES
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == *alias));

    let telemetry_name_idx = headers.iter().position(|h| h == channels::TELEMETRY_NAME_COLUMN);
    let value_idx = channels::VALUE_COLUMN_ALIASES
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == *alias));

    if let (Some(name_idx), Some(val_idx)) = (telemetry_name_idx, value_idx) {
        return Ok(HeaderLayout {
            shape: Shape::Long,
            meta_time_idx,
            vehicle_idx,
            telemetry_name_idx: Some(name_idx),
            value_idx: Some(val_idx),
            wide_channel_cols: Vec::new(),
        });
    }

    let reserved: Vec<usize> = [Some(meta_time_idx), vehicle_idx].into_iter().flatten().collect();
    let wide_channel_cols = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| !reserved.contains(idx))
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    Ok(HeaderLayout {
        shape: Shape::Wide,
        meta_time_idx,
        vehicle_idx,
        telemetry_name_idx: None,
        value_idx: None,
        wide_channel_cols,
    })
}

fn vehicle_id_of(record: &csv::StringRecord, layout: &HeaderLayout) -> String {
    layout
        .vehicle_idx
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_VEHICLE_ID)
        .to_string()
}

/// Reads every sample out of one CSV file, pivoting long-form chunks as
/// it goes. Rows with an unparseable `meta_time` are dropped.
pub fn read_samples(path: &Path) -> Result<Vec<RawSample>, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| IngestError::CsvParse {
            path: path.display().to_string(),
            source,
        })?
        .clone();
    let layout = layout_for(&headers)?;

    match layout.shape {
        Shape::Long => read_long_form(&mut reader, &layout, path),
        Shape::Wide => read_wide_form(&mut reader, &layout, path),
    }
}

fn read_long_form(
    reader: &mut csv::Reader<std::fs::File>,
    layout: &HeaderLayout,
    path: &Path,
) -> Result<Vec<RawSample>, IngestError> {
    let name_idx = layout.telemetry_name_idx.expect("long-form has a telemetry_name column");
    let value_idx = layout.value_idx.expect("long-form has a value column");

    let mut pivot: HashMap<(String, i64), HashMap<String, f64>> = HashMap::new();
    let mut chunk_rows = 0usize;
    for result in reader.records() {
        let record = result.map_err(|source| IngestError::CsvParse {
            path: path.display().to_string(),
            source,
        })?;
        chunk_rows += 1;
        if chunk_rows % CHUNK_ROWS == 0 {
            tracing::debug!(file = %path.display(), rows = chunk_rows, "ingest: streamed chunk");
        }

        let Some(ts) = record.get(layout.meta_time_idx).and_then(parse_meta_time) else {
            continue;
        };
        let vehicle_id = vehicle_id_of(&record, layout);
        let Some(channel_name) = record.get(name_idx).map(str::trim).filter(|s| !s.is_empty()) else {
            continue;
        };
        let Some(value) = record.get(value_idx).and_then(|raw| raw.trim().parse::<f64>().ok()) else {
            continue;
        };

        pivot
            .entry((vehicle_id, ts))
            .or_default()
            .entry(channel_name.to_string())
            .or_insert(value);
    }

    Ok(pivot
        .into_iter()
        .map(|((vehicle_id, ts), values)| RawSample {
            timestamp_ms: ts,
            vehicle_id,
            values,
        })
        .collect())
}

fn read_wide_form(
    reader: &mut csv::Reader<std::fs::File>,
    layout: &HeaderLayout,
    path: &Path,
) -> Result<Vec<RawSample>, IngestError> {
    let mut samples = Vec::new();
    let mut chunk_rows = 0usize;
    for result in reader.records() {
        let record = result.map_err(|source| IngestError::CsvParse {
            path: path.display().to_string(),
            source,
        })?;
        chunk_rows += 1;
        if chunk_rows % CHUNK_ROWS == 0 {
            tracing::debug!(file = %path.display(), rows = chunk_rows, "ingest: streamed chunk");
        }

        let Some(ts) = record.get(layout.meta_time_idx).and_then(parse_meta_time) else {
            continue;
        };
        let vehicle_id = vehicle_id_of(&record, layout);
        let mut values = HashMap::with_capacity(layout.wide_channel_cols.len());
        for (idx, name) in &layout.wide_channel_cols {
            if let Some(raw) = record.get(*idx) {
                if let Ok(value) = raw.trim().parse::<f64>() {
                    values.insert(name.clone(), value);
                }
            }
        }
        samples.push(RawSample {
            timestamp_ms: ts,
            vehicle_id,
            values,
        });
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn detects_and_pivots_long_form() {
        let file = write_csv(
            "meta_time,Vehicle_ID,telemetry_name,value\n\
             0,12,speed,100.0\n\
             0,12,pbrake_f,5.0\n\
             50,12,speed,101.0\n",
        );
        let samples = read_samples(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        let first = samples.iter().find(|s| s.timestamp_ms == 0).unwrap();
        assert_eq!(first.vehicle_id, "12");
        assert_eq!(first.values.get("speed"), Some(&100.0));
        assert_eq!(first.values.get("pbrake_f"), Some(&5.0));
    }

    #[test]
    fn reads_wide_form_rows_directly() {
        let file = write_csv(
            "meta_time,Vehicle_ID,speed,pbrake_f\n\
             0,12,100.0,5.0\n\
             50,12,101.0,5.1\n",
        );
        let samples = read_samples(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].values.get("speed"), Some(&100.0));
    }

    #[test]
    fn falls_back_to_default_vehicle_when_no_alias_column_present() {
        let file = write_csv("meta_time,speed\n0,100.0\n");
        let samples = read_samples(file.path()).unwrap();
        assert_eq!(samples[0].vehicle_id, DEFAULT_VEHICLE_ID);
    }

    #[test]
    fn drops_rows_with_unparseable_timestamp() {
        let file = write_csv("meta_time,speed\nnot-a-time,100.0\n0,101.0\n");
        let samples = read_samples(file.path()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].timestamp_ms, 0);
    }

    #[test]
    fn missing_meta_time_column_is_an_error() {
        let file = write_csv("speed\n100.0\n");
        let err = read_samples(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::MissingPivotColumn(_)));
    }
}
