//! Credit serial number generation.
//!
//! Serials have the shape `BCC-{vintage_year}-{entropy}` where the entropy
//! segment is drawn from an uppercase base36 alphabet. Uniqueness is the
//! contract, enforced by the `uq_carbon_credits_serial_number` index; the
//! entropy here only makes collisions improbable enough that retries are a
//! non-event.

use rand::Rng;

/// Registry prefix stamped on every serial.
pub const SERIAL_PREFIX: &str = "BCC";

/// Length of the random entropy segment.
pub const SERIAL_ENTROPY_LEN: usize = 10;

const SERIAL_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a serial number for a credit lot of the given vintage year.
pub fn generate_serial(vintage_year: i32) -> String {
    let mut rng = rand::rng();
    let entropy: String = (0..SERIAL_ENTROPY_LEN)
        .map(|_| {
            let idx = rng.random_range(0..SERIAL_ALPHABET.len());
            SERIAL_ALPHABET[idx] as char
        })
        .collect();
    format!("{SERIAL_PREFIX}-{vintage_year}-{entropy}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn serial_has_expected_shape() {
        let serial = generate_serial(2026);
        let parts: Vec<&str> = serial.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], SERIAL_PREFIX);
        assert_eq!(parts[1], "2026");
        assert_eq!(parts[2].len(), SERIAL_ENTROPY_LEN);
    }

    #[test]
    fn entropy_segment_uses_base36_alphabet() {
        let serial = generate_serial(2025);
        let entropy = serial.rsplit('-').next().unwrap();
        assert!(entropy
            .bytes()
            .all(|b| SERIAL_ALPHABET.contains(&b)));
    }

    #[test]
    fn serials_are_distinct_across_a_large_sample() {
        let serials: HashSet<String> = (0..1000).map(|_| generate_serial(2026)).collect();
        assert_eq!(serials.len(), 1000);
    }
}
