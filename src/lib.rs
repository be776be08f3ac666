use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

pub mod common;
pub mod convert;
pub mod extract;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod records;
pub mod render;
pub mod setup;

use common::{PHOTO_COORDINATES_CSV, PHOTO_INFO_CSV};

/// Run the three pipeline stages in strict sequence: extract GPS metadata to
/// a tabular file, flatten it to decimal coordinates, render the map.
///
/// The intermediate tabular files live next to the output document. When no
/// geotagged photo is found the pipeline stops after stage 1 with nothing
/// written. On success the two intermediate files are removed unless
/// `keep_intermediates` is set.
pub fn run(root: &Path, output: &Path, keep_intermediates: bool) -> Result<()> {
    let out_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let photo_csv = out_dir.join(PHOTO_INFO_CSV);
    let coordinates_csv = out_dir.join(PHOTO_COORDINATES_CSV);

    let found = extract::scan_to_csv(root, &photo_csv)?;
    if found == 0 {
        println!("No geotagged photos found under {}.", root.display());
        return Ok(());
    }
    println!(
        "Saved metadata for {} geotagged photos to {}.",
        found,
        photo_csv.display()
    );

    let converted = convert::flatten_to_csv(&photo_csv, &coordinates_csv)?;
    println!(
        "Saved {} coordinate rows to {}.",
        converted,
        coordinates_csv.display()
    );

    let document = render::render_map(&coordinates_csv, output)?;
    println!(
        "Map with {} markers and {} path segments saved to {}.",
        document.markers.len(),
        document.segments.len(),
        output.display()
    );

    if !keep_intermediates {
        fs::remove_file(&photo_csv)
            .with_context(|| format!("failed to remove {}", photo_csv.display()))?;
        fs::remove_file(&coordinates_csv)
            .with_context(|| format!("failed to remove {}", coordinates_csv.display()))?;
        info!("Removed intermediate files");
    }

    Ok(())
}
