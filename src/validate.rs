//! Input and output path validation.
//!
//! Runs before any PDF parsing so that the common mistakes (missing file,
//! wrong file type, refusing to clobber an existing output) fail with a
//! precise error and exit code.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Header length needed to read the version, e.g. `%PDF-1.7`.
const HEADER_LEN: usize = PDF_MAGIC.len() + 3;

/// Check that a header starts with `%PDF-x.y` and return the version.
pub fn pdf_version(header: &[u8]) -> Result<String> {
    if header.len() < HEADER_LEN || !header.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = &header[PDF_MAGIC.len()..HEADER_LEN];
    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version(data).is_ok()
}

/// Validate that the input file exists, has a `.pdf` extension and starts
/// with a PDF header. Returns the PDF version.
pub fn validate_input_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    let is_pdf_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !is_pdf_ext {
        return Err(Error::InvalidExtension(path.to_path_buf()));
    }

    let mut header = Vec::with_capacity(HEADER_LEN);
    File::open(path)?
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    pdf_version(&header)
}

/// Validate that the output file can be written.
///
/// The parent directory must exist, and an existing file is only accepted
/// with `force`.
pub fn validate_output_path<P: AsRef<Path>>(path: P, force: bool) -> Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(Error::OutputDirMissing(parent.to_path_buf()));
    }

    if path.exists() && !force {
        return Err(Error::OutputExists(path.to_path_buf()));
    }

    Ok(())
}

/// Default output path: the input path with its extension replaced.
pub fn default_output_path<P: AsRef<Path>>(input: P, extension: &str) -> PathBuf {
    input.as_ref().with_extension(extension)
}
