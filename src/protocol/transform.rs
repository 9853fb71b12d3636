//! Channel transform applied to payload bytes.
//!
//! Payload bytes are stored as `255 - b` so generated images come out mostly
//! dark. Header bytes never pass through here.

/// Invert a single channel byte
#[inline]
#[must_use]
pub const fn invert(byte: u8) -> u8 {
    u8::MAX - byte
}

/// Invert every byte of `bytes` in place
#[inline]
pub fn invert_in_place(bytes: &mut [u8]) {
    for byte in bytes {
        *byte = invert(*byte);
    }
}
