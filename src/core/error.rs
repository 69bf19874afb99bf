use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document generation failed: {0}")]
    Generation(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl From<rust_xlsxwriter::XlsxError> for DocumentError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        DocumentError::Spreadsheet(error.to_string())
    }
}

impl From<reqwest::Error> for DocumentError {
    fn from(error: reqwest::Error) -> Self {
        DocumentError::Upstream(error.to_string())
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;
