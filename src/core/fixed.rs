// Fixed-point helpers for song positions and camera parameters

/// Signed fixed-point value with `FIXED_SHIFT` fractional bits
pub type Fixed = i32;

/// Number of fractional bits in a [`Fixed`]
pub const FIXED_SHIFT: u32 = 10;

/// The value 1.0 as a [`Fixed`]
pub const FIXED_UNIT: Fixed = 1 << FIXED_SHIFT;

/// Build a fixed-point value from a fraction `num / den`
pub const fn fixed_dec(num: i32, den: i32) -> Fixed {
    (num * FIXED_UNIT) / den
}

/// Integer part of a fixed-point value, rounding toward negative infinity
pub const fn fixed_floor(value: Fixed) -> i32 {
    value >> FIXED_SHIFT
}

/// Convert a fixed-point value to `f32`
pub fn fixed_to_f32(value: Fixed) -> f32 {
    value as f32 / FIXED_UNIT as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_dec() {
        assert_eq!(fixed_dec(1, 1), FIXED_UNIT);
        assert_eq!(fixed_dec(-50, 1), -50 * FIXED_UNIT);
        assert_eq!(fixed_dec(1, 2), FIXED_UNIT / 2);
    }

    #[test]
    fn test_fixed_floor() {
        assert_eq!(fixed_floor(fixed_dec(9, 2)), 4);
        assert_eq!(fixed_floor(0), 0);
        // Pre-roll positions stay negative
        assert_eq!(fixed_floor(-1), -1);
        assert_eq!(fixed_floor(fixed_dec(-3, 1)), -3);
    }

    #[test]
    fn test_fixed_to_f32() {
        assert_relative_eq!(fixed_to_f32(fixed_dec(13, 10)), 1.3, epsilon = 0.001);
        assert_relative_eq!(fixed_to_f32(fixed_dec(16, 1)), 16.0);
    }
}
