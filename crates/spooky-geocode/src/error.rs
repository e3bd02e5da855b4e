use thiserror::Error;

/// Geocoding provider errors
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Geocoding provider responded with HTTP {status}")]
    Status { status: u16 },

    #[error("Invalid geocoding provider URL: {0}")]
    InvalidUrl(String),

    #[error("Geocoding provider unavailable: {0}")]
    Unavailable(String),
}

pub type GeocodeResult<T> = std::result::Result<T, GeocodeError>;
