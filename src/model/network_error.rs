#[derive(thiserror::Error, Debug, Clone)]
pub enum NetworkError {
    #[error("duplicate segment name: {0}")]
    DuplicateSegmentName(String),
    #[error("polyline for {0} has fewer than 2 points")]
    PolylineTooShort(String),
}
