use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tracker lifecycle error: {0}")]
    Lifecycle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("Link not found: {0}")]
    UnknownLink(String),
}

pub type Result<T> = std::result::Result<T, Error>;
