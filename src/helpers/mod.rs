pub mod files;
pub mod validate;

pub use files::{InspectedFile, MAX_UPLOAD_BYTES, SourceFormat, inspect, sniff_delimiter};
pub use validate::{REDACTED_PASSWORD, has_csv_extension, safe_filename};
