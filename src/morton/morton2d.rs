//! Morton encoding/decoding for 2D coordinates
//!
//! Uses shift-mask bit manipulation for fast encoding/decoding. The full
//! 32-bit range of each coordinate is supported; the interleaved result
//! always fits in a u64.

/// Spreads the bits of a 32-bit integer to every 2nd bit
/// Used for Morton encoding
#[inline(always)]
fn spread_bits(v: u32) -> u64 {
    let mut v = v as u64;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

/// Compacts every 2nd bit back to a 32-bit integer
/// Used for Morton decoding
#[inline(always)]
fn compact_bits(v: u64) -> u32 {
    let mut v = v & 0x5555_5555_5555_5555;
    v = (v | (v >> 1)) & 0x3333_3333_3333_3333;
    v = (v | (v >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v >> 4)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v >> 8)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v >> 16)) & 0x0000_0000_FFFF_FFFF;
    v as u32
}

/// Encode 2D coordinates into a Morton code (Z-order)
///
/// `x` contributes the even bit positions (including the least-significant
/// bit), `y` the odd positions. When the code is used as a storage offset
/// into a rank-R matrix, the caller guarantees `x < R` and `y < R`.
#[inline(always)]
pub fn morton_encode(x: u32, y: u32) -> u64 {
    spread_bits(x) | (spread_bits(y) << 1)
}

/// Decode a Morton code back to 2D coordinates
///
/// Exact inverse of [`morton_encode`]. When the code is a storage offset
/// into a rank-R matrix, the caller guarantees `morton < R * R`.
#[inline(always)]
pub fn morton_decode(morton: u64) -> (u32, u32) {
    let x = compact_bits(morton);
    let y = compact_bits(morton >> 1);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_morton_encode_decode() {
        let test_cases = [
            (0, 0),
            (1, 1),
            (1, 2),
            (2, 1),
            (7, 7),
            (15, 15),
            (100, 200),
            (1000, 2000),
            (u32::MAX, 0),
            (u32::MAX, u32::MAX),
        ];

        for (x, y) in test_cases {
            let morton = morton_encode(x, y);
            let (dx, dy) = morton_decode(morton);
            assert_eq!((x, y), (dx, dy), "Failed for ({}, {})", x, y);
        }
    }

    #[test]
    fn test_first_codes_trace_z_curve() {
        // The first quad of the curve in (x, y) order
        assert_eq!(morton_encode(0, 0), 0);
        assert_eq!(morton_encode(1, 0), 1);
        assert_eq!(morton_encode(0, 1), 2);
        assert_eq!(morton_encode(1, 1), 3);
        assert_eq!(morton_decode(4), (2, 0));
    }

    #[test]
    fn test_interleave_is_asymmetric() {
        // Transposed coordinates must produce distinct codes
        let a = morton_encode(1, 2);
        let b = morton_encode(2, 1);
        assert_ne!(a, b);
        assert_eq!(morton_decode(a), (1, 2));
        assert_eq!(morton_decode(b), (2, 1));
    }

    #[test]
    fn test_bijection_over_power_of_two_grids() {
        // For a rank-R grid, encoding must cover [0, R*R) exactly once
        for rank in [1u32, 2, 4, 8, 16] {
            let size = (rank as u64) * (rank as u64);
            let mut seen = vec![false; size as usize];
            for y in 0..rank {
                for x in 0..rank {
                    let morton = morton_encode(x, y);
                    assert!(
                        morton < size,
                        "encode({}, {}) = {} escapes rank {} grid",
                        x,
                        y,
                        morton,
                        rank
                    );
                    assert!(
                        !seen[morton as usize],
                        "encode({}, {}) = {} already produced",
                        x,
                        y,
                        morton
                    );
                    seen[morton as usize] = true;
                }
            }
            assert!(seen.iter().all(|&v| v), "rank {} grid not covered", rank);
        }
    }
}
