use core::fmt;

use paywire_protocol::WireError;

#[derive(Debug)]
pub enum ToolError {
    Io(String),
    Config(String),
    Hex(String),
    Wire(WireError),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {}", msg),
            Self::Config(msg) => write!(f, "config error: {}", msg),
            Self::Hex(msg) => write!(f, "hex error: {}", msg),
            Self::Wire(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<hex::FromHexError> for ToolError {
    fn from(err: hex::FromHexError) -> Self {
        Self::Hex(err.to_string())
    }
}

impl From<WireError> for ToolError {
    fn from(err: WireError) -> Self {
        Self::Wire(err)
    }
}
