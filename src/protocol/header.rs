//! Pickle frame header
//!
//! The header is 8 channel-bytes and is written without the payload inversion.

use super::{Error, HEADER_SIZE, MAX_PAYLOAD_SIZE, SIGNATURE};

/// Pickle frame header (8 bytes)
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      'P'      |      'C'      |      'K'      |      'L'      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                 Payload Length (4, big-endian)                |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    payload_len: u32,
}

impl FrameHeader {
    /// Create a header for a payload of `payload_len` bytes
    #[must_use]
    pub const fn new(payload_len: u32) -> Self {
        Self { payload_len }
    }

    /// Create a header for a payload of `len` bytes, rejecting lengths the
    /// 32-bit field cannot hold
    pub fn for_len(len: usize) -> super::Result<Self> {
        let payload_len = u32::try_from(len).map_err(|_| Error::PayloadTooLarge {
            size: len as u64,
            max: MAX_PAYLOAD_SIZE,
        })?;
        Ok(Self::new(payload_len))
    }

    /// Get payload length
    #[must_use]
    pub const fn payload_len(&self) -> u32 {
        self.payload_len
    }

    /// Channel-bytes occupied by header and payload together
    #[must_use]
    pub const fn frame_len(&self) -> u64 {
        HEADER_SIZE as u64 + self.payload_len as u64
    }

    /// Convert to bytes (signature, then big-endian length)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];

        bytes[0..4].copy_from_slice(&SIGNATURE);
        bytes[4..8].copy_from_slice(&self.payload_len.to_be_bytes());

        bytes
    }

    /// Parse from the leading channel-bytes of a frame
    ///
    /// A signature mismatch, including a stream too short to hold one, is
    /// reported as [`Error::NotAPickle`]. A matching signature without room for
    /// the length field is [`Error::TruncatedHeader`].
    pub fn from_bytes(bytes: &[u8]) -> super::Result<Self> {
        let sig_len = SIGNATURE.len();
        if bytes.len() < sig_len || bytes[..sig_len] != SIGNATURE {
            return Err(Error::NotAPickle {
                found: bytes[..bytes.len().min(sig_len)].to_vec(),
            });
        }

        let Some(len_bytes) = bytes.get(sig_len..HEADER_SIZE) else {
            return Err(Error::TruncatedHeader {
                needed: HEADER_SIZE,
                got: bytes.len(),
            });
        };

        let mut raw = [0u8; 4];
        raw.copy_from_slice(len_bytes);
        Ok(Self::new(u32::from_be_bytes(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let bytes = FrameHeader::new(2).to_bytes();
        assert_eq!(&bytes, b"PCKL\x00\x00\x00\x02");
    }

    #[test]
    fn test_header_length_is_big_endian() {
        let bytes = FrameHeader::new(0x0102_0304).to_bytes();
        assert_eq!(&bytes[4..], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = FrameHeader::new(789);
        let decoded = FrameHeader::from_bytes(&header.to_bytes()).unwrap();

        assert_eq!(decoded, header);
        assert_eq!(decoded.frame_len(), 797);
    }

    #[test]
    fn test_invalid_signature() {
        let result = FrameHeader::from_bytes(b"PNG1\x00\x00\x00\x00");
        assert!(matches!(result, Err(Error::NotAPickle { found }) if found == b"PNG1"));
    }

    #[test]
    fn test_short_stream_is_not_a_pickle() {
        assert!(matches!(
            FrameHeader::from_bytes(b"PCK"),
            Err(Error::NotAPickle { .. })
        ));
        assert!(matches!(
            FrameHeader::from_bytes(&[]),
            Err(Error::NotAPickle { .. })
        ));
    }

    #[test]
    fn test_signature_without_length_is_truncated() {
        assert!(matches!(
            FrameHeader::from_bytes(b"PCKL\x00\x00"),
            Err(Error::TruncatedHeader { needed: 8, got: 6 })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_length_rejected() {
        let result = FrameHeader::for_len(u32::MAX as usize + 1);
        assert!(matches!(
            result,
            Err(Error::PayloadTooLarge { size, max }) if size == MAX_PAYLOAD_SIZE + 1 && max == MAX_PAYLOAD_SIZE
        ));
        assert!(FrameHeader::for_len(u32::MAX as usize).is_ok());
    }

    #[test]
    fn test_max_length_header() {
        let header = FrameHeader::new(u32::MAX);
        assert_eq!(header.frame_len(), u64::from(u32::MAX) + 8);
        assert_eq!(FrameHeader::from_bytes(&header.to_bytes()).unwrap(), header);
    }
}
