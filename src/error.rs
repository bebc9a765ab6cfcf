use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("`{0}` is an unknown series variant")]
    UnknownSeriesVariant(String),

    #[error("date `{date}` does not match format `{format}`")]
    InvalidDate { date: String, format: &'static str },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render pipeline is already drawing")]
    RenderInProgress,

    #[error("chart host is not mounted")]
    NotMounted,
}
