//! J1708 message checksum
//!
//! The checksum byte is the additive two's complement of every other byte in
//! the message: appending it makes the whole frame sum to 0 mod 256.

/// Compute the checksum byte for a message (MID + body, no checksum)
#[must_use]
pub fn compute(bytes: &[u8]) -> u8 {
    let sum = bytes
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte));
    if sum == 0 { 0 } else { 0u8.wrapping_sub(sum) }
}

/// Validate a message including its trailing checksum byte
///
/// True iff the sum of all bytes, checksum included, is 0 mod 256. Callers
/// must reject sequences shorter than 2 bytes before calling; such a frame
/// cannot carry both a MID and a checksum.
#[must_use]
pub fn validate(bytes_with_checksum: &[u8]) -> bool {
    bytes_with_checksum
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_known_value() {
        // MID 128 (engine), PID 84 road speed, raw 0x50
        let msg = [0x80u8, 0x54, 0x50];
        let sum: u32 = msg.iter().map(|&b| u32::from(b)).sum();
        let checksum = compute(&msg);
        assert_eq!((sum + u32::from(checksum)) % 256, 0);
    }

    #[test]
    fn test_compute_zero_sum() {
        // 0x80 + 0x80 == 0 mod 256 already
        assert_eq!(compute(&[0x80, 0x80]), 0);
    }

    #[test]
    fn test_validate_accepts_appended_checksum() {
        let msg = [0xACu8, 0x00, 0x2B, 0xFF];
        let mut framed = msg.to_vec();
        framed.push(compute(&msg));
        assert!(validate(&framed));
    }

    #[test]
    fn test_validate_rejects_corruption() {
        let msg = [0xACu8, 0x00, 0x2B];
        let mut framed = msg.to_vec();
        framed.push(compute(&msg));
        framed[1] ^= 0x10;
        assert!(!validate(&framed));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: compute() always produces a validating checksum
            #[test]
            fn prop_compute_validates(msg in prop::collection::vec(any::<u8>(), 2..64)) {
                let mut framed = msg.clone();
                framed.push(compute(&msg));
                prop_assert!(validate(&framed));
            }

            /// Property: flipping any message byte breaks validation
            #[test]
            fn prop_corruption_detected(
                msg in prop::collection::vec(any::<u8>(), 2..64),
                offset_ratio in 0.0f64..1.0,
                corrupt in 1u8..=255,
            ) {
                let mut framed = msg.clone();
                framed.push(compute(&msg));

                let offset = (framed.len() as f64 * offset_ratio) as usize;
                let offset = offset.min(framed.len() - 1);
                framed[offset] = framed[offset].wrapping_add(corrupt);

                prop_assert!(!validate(&framed));
            }
        }
    }
}
