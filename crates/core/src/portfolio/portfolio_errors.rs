use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    /// The statement produced no holdings. The previously installed
    /// portfolio, if any, stays current.
    #[error("No holdings found in the statement")]
    ExtractionEmpty,

    /// A refresh was requested before any portfolio was uploaded.
    #[error("No portfolio data found. Please upload a statement first.")]
    NoPortfolio,

    /// The extractor failed to read the statement.
    #[error("Failed to extract holdings: {0}")]
    Extraction(String),
}
