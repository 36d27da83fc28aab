use nox_array::VecError;

#[derive(Debug)]
pub enum LogError {
    FormatError(VecError),
    IoError(std::io::Error),
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FormatError(err) => write!(f, "log format error: {}", err),
            Self::IoError(_) => write!(f, "IO error"),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::FormatError(err) => Some(err),
            Self::IoError(err) => Some(err),
        }
    }
}

impl From<VecError> for LogError {

    fn from(value: VecError) -> Self {
        Self::FormatError(value)
    }
}

impl From<std::io::Error> for LogError {

    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}
