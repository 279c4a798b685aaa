pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    UtilsError(#[from] egx_utils::Error),

    #[error(transparent)]
    RatatuiExtraError(#[from] egx_ratatui_extra::Error),

    #[error("Draw failed: {0}")]
    Draw(std::io::Error),

    #[error("Unknown Theme: {0}")]
    UnknownTheme(String),

    #[error("Mpsc Recv Error: {0}")]
    MpscRecvError(#[from] std::sync::mpsc::RecvError),

    #[error("Input thread crashed.")]
    InputThreadCrashed,
}

impl Error {
    pub fn is_connect_reqwest(&self) -> bool {
        match self {
            Self::UtilsError(error) => error.is_connect(),
            _ => false,
        }
    }
}

pub trait FmtError {
    fn fmt_err(&self, id: &str) -> String;
}

impl FmtError for Error {
    fn fmt_err(&self, id: &str) -> String {
        if self.is_connect_reqwest() {
            format!("Please check that the backend is reachable - {id}: {self}")
        } else {
            format!("{id}: {self}")
        }
    }
}
