//! Local source file inspection: format detection, size ceiling, and
//! delimiter sniffing. Runs before a file is selected so obviously bad
//! inputs never reach the upload step.

use std::io::Read;
use std::path::Path;

use crate::error::FileError;
use crate::models::SelectedFile;

/// Upload size ceiling enforced by the backend; asserted here so oversized
/// files are rejected before any bytes travel.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Number of leading bytes sampled for delimiter sniffing.
const SNIFF_SAMPLE_BYTES: u64 = 4096;

/// Accepted source file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Txt,
    Json,
}

impl SourceFormat {
    pub fn label(self) -> &'static str {
        match self {
            SourceFormat::Csv => "CSV",
            SourceFormat::Tsv => "TSV",
            SourceFormat::Txt => "TXT",
            SourceFormat::Json => "JSON",
        }
    }

    fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "csv" => Some(SourceFormat::Csv),
            "tsv" => Some(SourceFormat::Tsv),
            "txt" => Some(SourceFormat::Txt),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Result of inspecting a local file before selection.
#[derive(Debug, Clone)]
pub struct InspectedFile {
    pub file: SelectedFile,
    pub format: SourceFormat,
    /// Sniffed field delimiter, when one could be determined.
    pub delimiter: Option<char>,
}

/// Inspect a local file: reject unsupported extensions and oversized files,
/// and sniff the delimiter from a leading sample for delimited formats.
pub fn inspect(path: &Path) -> Result<InspectedFile, FileError> {
    let extension =
        path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
    let format = SourceFormat::from_extension(&extension)
        .ok_or(FileError::UnsupportedFormat(extension))?;

    let size = std::fs::metadata(path)?.len();
    if size > MAX_UPLOAD_BYTES {
        return Err(FileError::TooLarge { size, limit: MAX_UPLOAD_BYTES });
    }

    let delimiter = match format {
        SourceFormat::Json => None,
        _ => sniff_delimiter(&read_sample(path)?),
    };

    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();
    Ok(InspectedFile {
        file: SelectedFile { name, size, path: path.to_path_buf() },
        format,
        delimiter,
    })
}

/// Guess the field delimiter of a delimited text sample.
///
/// Tries each candidate and keeps the one that parses the sample into a
/// consistent multi-field record shape; ties go to the candidate producing
/// more fields. Returns `None` when nothing parses convincingly (single
/// column files, binary noise).
pub fn sniff_delimiter(sample: &[u8]) -> Option<char> {
    const CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];

    let mut best: Option<(usize, u8)> = None;
    for candidate in CANDIDATES {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(candidate)
            .has_headers(false)
            .flexible(true)
            .from_reader(sample);

        let mut counts = Vec::new();
        for record in reader.records().take(8) {
            match record {
                Ok(record) => counts.push(record.len()),
                Err(_) => {
                    counts.clear();
                    break;
                }
            }
        }

        let Some(&fields) = counts.first() else { continue };
        if fields < 2 || counts.iter().any(|&c| c != fields) {
            continue;
        }
        if best.is_none_or(|(score, _)| fields > score) {
            best = Some((fields, candidate));
        }
    }

    best.map(|(_, delimiter)| delimiter as char)
}

fn read_sample(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut sample = Vec::new();
    std::fs::File::open(path)?.take(SNIFF_SAMPLE_BYTES).read_to_end(&mut sample)?;
    Ok(sample)
}
