//! Stage 1: walk a directory tree and pull GPS metadata out of every photo.

use crate::common::{ABSENT, VALID_IMAGE_EXTENSIONS};
use crate::records::{GpsFieldSet, PhotoRecord, ascii_value};
use anyhow::{Context, Result};
use exif::{In, Tag};
use log::{debug, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use walkdir::WalkDir;

/// Scan `root` for geotagged photos and write one row per photo to `out_csv`.
///
/// Returns the number of photos written. When nothing qualifies, no file is
/// created and 0 is returned so the caller can short-circuit the pipeline.
pub fn scan_to_csv(root: &Path, out_csv: &Path) -> Result<usize> {
    let records = scan_photos(root);
    if records.is_empty() {
        return Ok(0);
    }
    write_photo_csv(&records, out_csv)?;
    Ok(records.len())
}

/// Walk the tree and collect a record per geotagged photo. Unreadable files
/// are logged and skipped; the walk never aborts.
pub fn scan_photos(root: &Path) -> Vec<PhotoRecord> {
    let mut records = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|entry| entry.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_image_extension(path) {
            continue;
        }
        match read_photo_record(path) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => debug!("no GPS data in {}", path.display()),
            Err(err) => warn!("skipping {}: {err:#}", path.display()),
        }
    }
    records
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VALID_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn read_photo_record(path: &Path) -> Result<Option<PhotoRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(&file);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        // A photo without embedded metadata is not an error.
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read metadata from {}", path.display()));
        }
    };

    let gps = GpsFieldSet::from_fields(exif.fields());
    if gps.is_empty() {
        return Ok(None);
    }

    Ok(Some(PhotoRecord {
        file: path.to_string_lossy().into_owned(),
        datetime_original: ascii_field(&exif, Tag::DateTimeOriginal)
            .unwrap_or_else(|| ABSENT.to_string()),
        make: ascii_field(&exif, Tag::Make).unwrap_or_else(|| ABSENT.to_string()),
        model: ascii_field(&exif, Tag::Model).unwrap_or_else(|| ABSENT.to_string()),
        gps_info: serde_json::to_string(&gps)
            .with_context(|| format!("failed to encode GPS fields of {}", path.display()))?,
    }))
}

fn ascii_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    ascii_value(&field.value)
}

fn write_photo_csv(records: &[PhotoRecord], out_csv: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(out_csv)
        .with_context(|| format!("failed to create {}", out_csv.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
