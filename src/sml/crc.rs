//! # CRC16 Implementation
//!
//! CRC16 checksum calculation for SML transmissions, matching the variant
//! used by the meter firmware (DIN EN 62056-46).
//!
//! **Polynomial**: 0x8408 (reflected 0x1021)
//! **Initial Value**: 0xFFFF
//! **Final XOR**: 0xFFFF, result byte-swapped

/// Reflected CRC16 polynomial
const CRC16_POLY: u16 = 0x8408;

/// Precomputed CRC16 lookup table for fast calculation
const CRC16_TABLE: [u16; 256] = generate_crc16_table();

/// Generate CRC16 lookup table at compile time
const fn generate_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u16;
        let mut j = 0;

        while j < 8 {
            if (crc & 1) != 0 {
                crc = (crc >> 1) ^ CRC16_POLY;
            } else {
                crc >>= 1;
            }
            j += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Calculate the SML CRC16 checksum using the lookup table (fast)
///
/// The result is byte-swapped so it compares directly against the checksum
/// the meter embeds in the frame trailer, read big-endian.
///
/// # Arguments
///
/// * `data` - Byte slice to checksum (the inner SML message span)
///
/// # Returns
///
/// * `u16` - Calculated CRC16 checksum
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;

    for &byte in data {
        crc = (crc >> 8) ^ CRC16_TABLE[((crc ^ byte as u16) & 0xFF) as usize];
    }

    crc ^= 0xFFFF;
    crc.swap_bytes()
}

/// Calculate the SML CRC16 checksum bit by bit (slow, for verification)
///
/// Slower but directly follows the polynomial definition. Used to verify
/// the lookup table implementation in tests.
#[allow(dead_code)]
fn crc16_slow(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;

    for &byte in data {
        crc ^= byte as u16;

        for _ in 0..8 {
            if (crc & 1) != 0 {
                crc = (crc >> 1) ^ CRC16_POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc ^= 0xFFFF;
    crc.swap_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc16_empty() {
        assert_eq!(crc16(&[]), 0x0000);
    }

    #[test]
    fn test_crc16_known_vectors() {
        // Reference values for the DIN EN 62056-46 variant
        assert_eq!(crc16(b"123456789"), 0x6E90);
        assert_eq!(crc16(&[0x00]), 0x78F0);
        assert_eq!(crc16(&[0xFF; 4]), 0x470F);

        // The SML start sequence itself
        let start = [0x1B, 0x1B, 0x1B, 0x1B, 0x01, 0x01, 0x01, 0x01];
        assert_eq!(crc16(&start), 0x236E);

        let inc: Vec<u8> = (0x00..=0x0F).collect();
        assert_eq!(crc16(&inc), 0xE913);
    }

    #[test]
    fn test_crc16_lookup_table_matches_slow() {
        let test_data = [
            vec![0x01, 0x02, 0x03],
            vec![0xFF, 0xFE, 0xFD],
            vec![0x1B, 0x1B, 0x1B, 0x1B, 0x1A],
            vec![0x00; 306],
            vec![0xAA; 17],
        ];

        for data in test_data.iter() {
            assert_eq!(
                crc16(data),
                crc16_slow(data),
                "CRC mismatch for data: {:?}",
                data
            );
        }
    }

    #[test]
    fn test_crc16_changes_with_data() {
        let data1 = [0x77, 0x07, 0x01, 0x00];
        let data2 = [0x77, 0x07, 0x01, 0x01];

        assert_ne!(crc16(&data1), crc16(&data2), "CRC should change when data changes");
    }
}
