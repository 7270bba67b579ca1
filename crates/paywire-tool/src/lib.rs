//! Host-side glue for the `paywire` binary: config file, key files and the
//! command implementations.

pub mod commands;
pub mod config;
pub mod error;
pub mod keys;

pub use commands::{Terms, VerifyKeys};
pub use config::{load_tool_config, ToolConfig};
pub use error::ToolError;
pub use keys::{decode_hex, read_key_file, write_key_file};
