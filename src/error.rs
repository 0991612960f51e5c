use thiserror::Error;
#[derive(Debug, Error)]
pub enum LookHeartError {
    #[error("invalid parameter `{name}`: must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("waveform would hold {requested} samples, limit is {limit}")]
    TooManySamples { requested: f64, limit: usize },
    #[error("unknown chart category `{0}`")]
    UnknownCategory(String),
    #[error("unknown time period `{0}`")]
    UnknownPeriod(String),
    #[error("invalid event key `{0}`: expected an integer id or \"normal\"")]
    InvalidEventKey(String),
    #[error("invalid date key `{0}`: expected YYYY-MM-DD")]
    InvalidDateKey(String),
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for LookHeartError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        LookHeartError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for LookHeartError {
    fn from(value: image::ImageError) -> Self {
        LookHeartError::Plot(value.to_string())
    }
}
