pub const VALID_IMAGE_EXTENSIONS: &'static [&'static str] = &["jpg", "jpeg", "png", "gif"];

/// Stage-1 output: one row per geotagged photo, raw GPS field-set included.
pub const PHOTO_INFO_CSV: &str = "photo_info.csv";

/// Stage-2 output: the same rows flattened to decimal coordinates.
pub const PHOTO_COORDINATES_CSV: &str = "photo_info_with_coordinates.csv";

/// Sentinel stored in place of an absent EXIF value.
pub const ABSENT: &str = "N/A";

/// Timestamp format as stored in EXIF `DateTimeOriginal`.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Timestamp format shown in marker and segment popups.
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
