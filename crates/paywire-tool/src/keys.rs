//! Key files and hex input.
//!
//! Keys are stored as a single line of lowercase hex.

use std::fs;

use crate::error::ToolError;

pub fn decode_hex(input: &str) -> Result<Vec<u8>, ToolError> {
    let trimmed: String = input.split_whitespace().collect();
    Ok(hex::decode(trimmed)?)
}

pub fn read_key_file(path: &str) -> Result<Vec<u8>, ToolError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ToolError::Io(format!("key read failed ({path}): {e}")))?;
    decode_hex(&raw)
}

pub fn write_key_file(path: &str, key: &[u8]) -> Result<(), ToolError> {
    fs::write(path, format!("{}\n", hex::encode(key)))
        .map_err(|e| ToolError::Io(format!("key write failed ({path}): {e}")))
}
