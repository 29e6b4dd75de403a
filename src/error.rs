use thiserror::Error;

/// Errors surfaced by the layout pipeline. All of them are fatal for the
/// current pass; no partial output is ever returned.
#[derive(Debug, Error)]
pub enum FunnelError {
    /// The supplied rows are unusable before any computation starts.
    #[error("funnel data is not valid: {0}")]
    InvalidData(String),

    /// A caller-supplied color fails the strict hex check.
    #[error("invalid color format: {0}")]
    InvalidColor(String),

    /// The configuration produces geometry that cannot be drawn.
    #[error("degenerate layout: {0}")]
    DegenerateLayout(String),
}
