// Validation helpers

pub const REDACTED_PASSWORD: &str = "*****";

/// Reduce a server-reported path to its basename, stripping separators of
/// either convention. Falls back to the input when the basename is empty
/// (e.g. a trailing slash).
/// "/tmp/out/export.csv" → "export.csv", "C:\\out\\export.csv" → "export.csv"
pub fn safe_filename(path: &str) -> String {
    match path.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => path.to_string(),
    }
}

/// Whether an export file name carries the expected `.csv` extension.
/// A mismatch is a warning, never a validation failure.
pub fn has_csv_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".csv")
}
