#[derive(thiserror::Error, Debug)]
pub enum RatatuiExtraError {
    #[error("Chart size {width}x{height} is invalid, both sides must be at least {min}.")]
    InvalidChartSize { width: u16, height: u16, min: u16 },
}
