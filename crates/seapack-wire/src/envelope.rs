use bytes::{Bytes, BytesMut};

use crate::error::{Result, WireError};
use crate::header::{Header, HEADER_LEN};

/// Default maximum envelope length (header + body): 9000 bytes.
pub const DEFAULT_MAX_ENVELOPE: usize = 9000;

/// Assemble a complete envelope from a header and body.
///
/// Rejects envelopes whose total length exceeds `max_len`. This is a
/// pre-send admission check, not a wire-format constraint.
pub fn assemble(header: &Header, body: &[u8], max_len: usize) -> Result<Bytes> {
    let total = HEADER_LEN + body.len();
    if total > max_len {
        return Err(WireError::EnvelopeTooLarge {
            size: total,
            max: max_len,
        });
    }

    let mut buf = BytesMut::with_capacity(total);
    header.encode(&mut buf);
    buf.extend_from_slice(body);
    Ok(buf.freeze())
}

/// Split a received envelope into its decoded header and body slice.
pub fn split(raw: &[u8]) -> Result<(Header, &[u8])> {
    let header = Header::decode(raw)?;
    Ok((header, &raw[HEADER_LEN..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_split_roundtrip() {
        let header = Header::new(10, 3, 12.5);
        let envelope = assemble(&header, b"blob payload", DEFAULT_MAX_ENVELOPE).unwrap();

        assert_eq!(envelope.len(), HEADER_LEN + 12);

        let (decoded, body) = split(&envelope).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(body, b"blob payload");
    }

    #[test]
    fn assemble_empty_body() {
        let header = Header::new(32, 9, 0.0);
        let envelope = assemble(&header, b"", DEFAULT_MAX_ENVELOPE).unwrap();

        let (_, body) = split(&envelope).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn assemble_rejects_oversized_envelope() {
        let header = Header::new(10, 0, 0.0);
        let body = vec![0u8; DEFAULT_MAX_ENVELOPE];

        let err = assemble(&header, &body, DEFAULT_MAX_ENVELOPE).unwrap_err();
        assert!(matches!(
            err,
            WireError::EnvelopeTooLarge { size, max: DEFAULT_MAX_ENVELOPE }
                if size == HEADER_LEN + DEFAULT_MAX_ENVELOPE
        ));
    }

    #[test]
    fn assemble_at_exact_limit_passes() {
        let header = Header::new(10, 0, 0.0);
        let body = vec![0u8; DEFAULT_MAX_ENVELOPE - HEADER_LEN];

        assert!(assemble(&header, &body, DEFAULT_MAX_ENVELOPE).is_ok());
    }

    #[test]
    fn split_short_envelope() {
        let err = split(&[0u8; 5]).unwrap_err();
        assert!(matches!(err, WireError::HeaderTooShort { got: 5, .. }));
    }
}
