//! Decimal rendering of telemetry numbers
//!
//! Numbers shown to users are rounded half up on their shortest decimal form:
//! `1.25` with one decimal is `1.3`, and a `f32` reading of `4.125` with two
//! decimals is `4.13`. Rust's `{:.N}` rounds ties to even, which would print
//! `1.2` and `4.12`.

/// `value` with exactly `decimals` fraction digits, ties rounded away from zero
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }

    // `Display` gives the shortest round-trip form and never uses an exponent
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(core::iter::repeat(b'0')).take(decimals))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .is_some_and(|&d| d >= b'5');
    if round_up {
        carry_one(&mut digits);
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|&d| char::from(b'0' + d)));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|&d| char::from(b'0' + d)));
    }
    out
}

fn carry_one(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

/// Shortest form of `value` that always shows a fraction part (`45.0`, `-122.5`)
pub fn format_plain(value: f64) -> String {
    let text = format!("{}", value);
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_round_up() {
        assert_eq!(format_fixed(1.25, 1), "1.3");
        assert_eq!(format_fixed(1640.5, 0), "1641");
        assert_eq!(format_fixed(40.5, 0), "41");
        assert_eq!(format_fixed(4.125_f32 as f64, 2), "4.13");
    }

    #[test]
    fn test_negative_ties_round_away_from_zero() {
        assert_eq!(format_fixed(-4.25, 1), "-4.3");
        assert_eq!(format_fixed(-0.04, 1), "-0.0");
    }

    #[test]
    fn test_carry_into_new_digit() {
        assert_eq!(format_fixed(9.95, 1), "10.0");
        assert_eq!(format_fixed(999.5, 0), "1000");
    }

    #[test]
    fn test_pads_and_truncates() {
        assert_eq!(format_fixed(3.0, 2), "3.00");
        assert_eq!(format_fixed(1013.3_f32 as f64, 1), "1013.3");
        assert_eq!(format_fixed(12.34, 1), "12.3");
        assert_eq!(format_fixed(0.0, 0), "0");
    }

    #[test]
    fn test_plain_always_has_fraction() {
        assert_eq!(format_plain(45.0), "45.0");
        assert_eq!(format_plain(-122.0), "-122.0");
        assert_eq!(format_plain(45.5), "45.5");
    }
}
