use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChampionGgError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: champion.gg rejected the API key")]
    Forbidden,

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("`elo` must be one of: {expected}. Got {got}.")]
    InvalidElo { expected: String, got: String },

    #[error("`role` must be one of: {expected}. Got {got}.")]
    InvalidRole { expected: String, got: String },

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Can only get champion.gg data for champions on the most recent version ({latest}), got {version}")]
    VersionMismatch { version: String, latest: String },

    #[error("Transform error: {0}")]
    Transform(String),
}

pub type Result<T> = std::result::Result<T, ChampionGgError>;

impl From<serde_json::Error> for ChampionGgError {
    fn from(e: serde_json::Error) -> Self {
        ChampionGgError::Json(e.to_string())
    }
}
