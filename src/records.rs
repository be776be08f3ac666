use exif::{Context, Tag, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the stage-1 table: a geotagged photo and its raw GPS field-set.
///
/// `DateTimeOriginal` keeps the raw EXIF form (`YYYY:MM:DD HH:MM:SS`); absent
/// values are stored as the `N/A` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "DateTimeOriginal")]
    pub datetime_original: String,
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    /// JSON-encoded [`GpsFieldSet`].
    #[serde(rename = "GPSInfo")]
    pub gps_info: String,
}

/// The GPS IFD tags of one photo. Latitude/longitude are kept as raw
/// degree/minute/second triples; any other GPS tag is carried in display form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpsFieldSet {
    #[serde(rename = "GPSLatitude", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<[f64; 3]>,
    #[serde(rename = "GPSLongitude", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<[f64; 3]>,
    #[serde(rename = "GPSLatitudeRef", default, skip_serializing_if = "Option::is_none")]
    pub latitude_ref: Option<String>,
    #[serde(rename = "GPSLongitudeRef", default, skip_serializing_if = "Option::is_none")]
    pub longitude_ref: Option<String>,
    #[serde(flatten)]
    pub tags: BTreeMap<String, String>,
}

impl GpsFieldSet {
    /// Collect the GPS IFD tags out of a parsed EXIF block.
    pub fn from_fields<'a>(fields: impl Iterator<Item = &'a exif::Field>) -> Self {
        let mut set = GpsFieldSet::default();
        for field in fields {
            if field.ifd_num != exif::In::PRIMARY || !matches!(field.tag.0, Context::Gps) {
                continue;
            }
            match field.tag {
                Tag::GPSLatitude => set.latitude = dms_triple(&field.value),
                Tag::GPSLongitude => set.longitude = dms_triple(&field.value),
                Tag::GPSLatitudeRef => set.latitude_ref = ascii_value(&field.value),
                Tag::GPSLongitudeRef => set.longitude_ref = ascii_value(&field.value),
                other => {
                    set.tags
                        .insert(other.to_string(), field.display_value().to_string());
                }
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.latitude.is_none()
            && self.longitude.is_none()
            && self.latitude_ref.is_none()
            && self.longitude_ref.is_none()
            && self.tags.is_empty()
    }
}

fn dms_triple(value: &Value) -> Option<[f64; 3]> {
    match value {
        Value::Rational(parts) if parts.len() >= 3 => {
            Some([parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64()])
        }
        Value::SRational(parts) if parts.len() >= 3 => {
            Some([parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64()])
        }
        _ => None,
    }
}

/// Raw ASCII value of an EXIF field, without the display formatting the EXIF
/// crate applies (timestamps keep their original `YYYY:MM:DD` form).
pub(crate) fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) if !parts.is_empty() => Some(
            String::from_utf8_lossy(&parts[0])
                .trim_end_matches('\0')
                .trim()
                .to_string(),
        ),
        _ => None,
    }
}

/// One row of the stage-2 table: decimal coordinates plus the columns carried
/// over from the photo record. Latitude and longitude are always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    #[serde(rename = "GPSLatitude")]
    pub latitude: f64,
    #[serde(rename = "GPSLongitude")]
    pub longitude: f64,
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "DateTimeOriginal")]
    pub datetime_original: String,
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
}

impl CoordinateRecord {
    pub const HEADER: [&'static str; 6] = [
        "GPSLatitude",
        "GPSLongitude",
        "File",
        "DateTimeOriginal",
        "Make",
        "Model",
    ];
}
