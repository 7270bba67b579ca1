//! Fixed-width big-endian integer conversion.

pub const LONG_LEN: usize = 8;
pub const SHORT_LEN: usize = 2;

pub fn long_to_bytes(value: i64) -> [u8; LONG_LEN] {
    value.to_be_bytes()
}

pub fn bytes_to_long(bytes: [u8; LONG_LEN]) -> i64 {
    i64::from_be_bytes(bytes)
}

pub fn short_to_bytes(value: i16) -> [u8; SHORT_LEN] {
    value.to_be_bytes()
}

pub fn bytes_to_short(bytes: [u8; SHORT_LEN]) -> i16 {
    i16::from_be_bytes(bytes)
}
