//! Error types for pdf2md library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf2md operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a PDF to Markdown.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input file does not carry a `.pdf` extension.
    #[error("Input file is not a PDF (invalid extension): {}", .0.display())]
    InvalidExtension(PathBuf),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be opened without a password.
    #[error("PDF is password-protected and cannot be processed")]
    PasswordProtected,

    /// The directory that should contain the output file does not exist.
    #[error("Output directory not found: {}", .0.display())]
    OutputDirMissing(PathBuf),

    /// The output file exists and overwriting was not requested.
    #[error("Output file already exists: {}. Use --force to overwrite.", .0.display())]
    OutputExists(PathBuf),

    /// Writing the output file failed.
    #[error("Error writing output file {}: {source}", .path.display())]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A page's content stream could not be read during extraction.
    #[error("Failed to extract text from page {page}: {reason}")]
    PageExtraction {
        /// 1-based page number
        page: u32,
        /// What went wrong
        reason: String,
    },

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// The extractor handed over a fragment that breaks the fragment contract.
    #[error("Internal contract violation: fragment {order}: {reason}")]
    InvalidFragment {
        /// Order index of the offending fragment
        order: u64,
        /// What is wrong with it
        reason: String,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Process exit code reported by the command-line tool for this error.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 1 | input file not found |
    /// | 2 | input is not a valid PDF |
    /// | 3 | password-protected PDF |
    /// | 4 | output path or write error |
    /// | 5 | anything else |
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InputNotFound(_) => 1,
            Error::InvalidExtension(_)
            | Error::UnknownFormat
            | Error::UnsupportedVersion(_)
            | Error::PdfParse(_) => 2,
            Error::PasswordProtected => 3,
            Error::OutputDirMissing(_) | Error::OutputExists(_) | Error::OutputWrite { .. } => 4,
            Error::Io(_)
            | Error::PageOutOfRange(..)
            | Error::PageExtraction { .. }
            | Error::InvalidPageRange(_)
            | Error::InvalidFragment { .. }
            | Error::Other(_) => 5,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::PasswordProtected,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
