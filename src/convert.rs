//! Stage 2: flatten raw GPS field-sets into decimal coordinates.

use crate::records::{CoordinateRecord, GpsFieldSet, PhotoRecord};
use anyhow::{Context, Result};
use log::warn;
use std::path::Path;

/// Read the stage-1 table, convert each row's GPS triple to decimal degrees,
/// and write the flattened rows to `out_csv`.
///
/// Rows with malformed or incomplete GPS data are logged by index and
/// dropped. The output file is written even when no row survives.
pub fn flatten_to_csv(in_csv: &Path, out_csv: &Path) -> Result<usize> {
    let mut reader = csv::Reader::from_path(in_csv)
        .with_context(|| format!("failed to open {}", in_csv.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(out_csv)
        .with_context(|| format!("failed to create {}", out_csv.display()))?;
    writer.write_record(CoordinateRecord::HEADER)?;

    let mut kept = 0;
    for (index, row) in reader.deserialize::<PhotoRecord>().enumerate() {
        let photo = match row {
            Ok(photo) => photo,
            Err(err) => {
                warn!("skipping row {index}: {err}");
                continue;
            }
        };
        match coordinate_record(&photo) {
            Some(record) => {
                writer.serialize(&record)?;
                kept += 1;
            }
            None => warn!("skipping row {index}: missing or malformed GPS info"),
        }
    }
    writer.flush()?;
    Ok(kept)
}

/// Flatten one photo record. `None` when the GPS field-set cannot be parsed
/// or lacks either coordinate triple.
pub fn coordinate_record(photo: &PhotoRecord) -> Option<CoordinateRecord> {
    let gps: GpsFieldSet = serde_json::from_str(&photo.gps_info).ok()?;
    let latitude = dms_to_decimal(gps.latitude?, gps.latitude_ref.as_deref());
    let longitude = dms_to_decimal(gps.longitude?, gps.longitude_ref.as_deref());
    Some(CoordinateRecord {
        latitude,
        longitude,
        file: photo.file.clone(),
        datetime_original: photo.datetime_original.clone(),
        make: photo.make.clone(),
        model: photo.model.clone(),
    })
}

/// `decimal = deg + min/60 + sec/3600`, with the sign handled explicitly:
/// a negative degrees component negates the whole magnitude, and a southern
/// or western hemisphere reference forces a negative result.
pub fn dms_to_decimal(dms: [f64; 3], hemisphere: Option<&str>) -> f64 {
    let [degrees, minutes, seconds] = dms;
    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    let decimal = if degrees.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    };
    match hemisphere {
        Some(h) if h.eq_ignore_ascii_case("S") || h.eq_ignore_ascii_case("W") => -decimal.abs(),
        _ => decimal,
    }
}
