//! Stage 3: turn decimal coordinate rows into a self-contained HTML map.
//!
//! Markers are always visible; the travel path lives on a separate overlay
//! layer that starts hidden and is toggled through the layer control.

use crate::common::{ABSENT, DISPLAY_DATETIME_FORMAT, EXIF_DATETIME_FORMAT};
use crate::records::CoordinateRecord;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    /// Display timestamp, or the `N/A` sentinel.
    pub time: String,
}

/// A line between two temporally adjacent photos, labeled with the later
/// photo's display timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub time: String,
}

#[derive(Debug, Default, Serialize)]
pub struct MapDocument {
    pub markers: Vec<Marker>,
    pub segments: Vec<Segment>,
}

/// Read the stage-2 table and write the map document to `out_html`.
/// Rows that fail to parse are ignored; they break neither markers nor path.
pub fn render_map(in_csv: &Path, out_html: &Path) -> Result<MapDocument> {
    let mut reader = csv::Reader::from_path(in_csv)
        .with_context(|| format!("failed to open {}", in_csv.display()))?;
    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<CoordinateRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(err) => debug!("ignoring row {index}: {err}"),
        }
    }

    let document = build_map_document(&records);
    fs::write(out_html, render_html(&document)?)
        .with_context(|| format!("failed to write {}", out_html.display()))?;
    Ok(document)
}

/// One marker per record in file order; path segments as a fold over
/// consecutive pairs of the timestamped records in capture order.
pub fn build_map_document(records: &[CoordinateRecord]) -> MapDocument {
    let markers = records
        .iter()
        .map(|record| Marker {
            lat: record.latitude,
            lon: record.longitude,
            time: display_time(record).unwrap_or_else(|| ABSENT.to_string()),
        })
        .collect();

    let mut timed: Vec<(NaiveDateTime, &CoordinateRecord)> = records
        .iter()
        .filter_map(|record| capture_time(record).map(|at| (at, record)))
        .collect();
    timed.sort_by_key(|&(at, _)| at);

    let segments = timed
        .windows(2)
        .map(|pair| {
            let (_, from) = pair[0];
            let (at, to) = pair[1];
            Segment {
                from: [from.latitude, from.longitude],
                to: [to.latitude, to.longitude],
                time: at.format(DISPLAY_DATETIME_FORMAT).to_string(),
            }
        })
        .collect();

    MapDocument { markers, segments }
}

fn capture_time(record: &CoordinateRecord) -> Option<NaiveDateTime> {
    if record.datetime_original == ABSENT {
        return None;
    }
    NaiveDateTime::parse_from_str(&record.datetime_original, EXIF_DATETIME_FORMAT).ok()
}

fn display_time(record: &CoordinateRecord) -> Option<String> {
    capture_time(record).map(|at| at.format(DISPLAY_DATETIME_FORMAT).to_string())
}

fn render_html(document: &MapDocument) -> Result<String> {
    let markers = serde_json::to_string(&document.markers)?;
    let segments = serde_json::to_string(&document.segments)?;
    Ok(MAP_TEMPLATE
        .replace("__MARKERS__", &markers)
        .replace("__SEGMENTS__", &segments))
}

const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>PhotoTrail</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        body { margin: 0; padding: 0; }
        #map { height: 100vh; width: 100vw; }
    </style>
</head>
<body>

    <div id="map"></div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        const markers = __MARKERS__;
        const segments = __SEGMENTS__;

        const map = L.map('map').setView([0, 0], 2);
        L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
            maxZoom: 19,
            attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a>'
        }).addTo(map);

        markers.forEach(function(m) {
            const popup = `<b>Latitude:</b> ${m.lat}<br><b>Longitude:</b> ${m.lon}<br><b>Time:</b> ${m.time}`;
            L.marker([m.lat, m.lon]).bindPopup(popup).addTo(map);
        });

        // Not added to the map: hidden until toggled through the control.
        const pathLayer = L.layerGroup();
        segments.forEach(function(s) {
            L.polyline([s.from, s.to], { color: 'blue', weight: 2, opacity: 1 })
                .bindPopup(`Time: ${s.time}`)
                .addTo(pathLayer);
        });

        L.control.layers(null, { 'Travel path': pathLayer }, { collapsed: false }).addTo(map);
    </script>

</body>
</html>
"#;
