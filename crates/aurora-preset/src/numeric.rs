//! Lenient numeric parsing and fixed-precision formatting.
//!
//! Preset values are parsed the way the C runtime's `strtol`/`strtof` family
//! does it: leading whitespace is skipped, the longest valid number prefix is
//! converted and everything after it (comments, stray text) is ignored.
//! Values out of range count as unparsable.
//!
//! Formatting mirrors `printf("%.Nf")`, which is what existing preset files
//! and tools expect byte for byte.

/// Whitespace as recognised by C's `isspace` in the "C" locale.
fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| is_c_space(b)).count()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses the integer prefix of `text`.
///
/// Returns `None` if no digits follow the optional whitespace and sign, or if
/// the value does not fit into an `i32`.
pub fn parse_int_prefix(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    let mut pos = skip_space(bytes);

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let digits = count_digits(&bytes[pos..]);
    if digits == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for &digit in &bytes[pos..pos + digits] {
        value = value
            .checked_mul(10)?
            .checked_add(i64::from(digit - b'0'))?;
    }
    if negative {
        value = -value;
    }

    i32::try_from(value).ok()
}

/// Parses the floating-point prefix of `text`.
///
/// Accepts an optional sign, decimal digits with an optional fraction and
/// exponent, a hex float (`0x1.8p3`), or the special words `inf`, `infinity`
/// and `nan` in any case.
/// Returns `None` if nothing parses, or if a finite number overflows to
/// infinity or underflows (non-zero digits yielding zero or a subnormal).
pub fn parse_float_prefix(text: &str) -> Option<f32> {
    let bytes = text.as_bytes();
    let mut pos = skip_space(bytes);

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };
    let sign = if negative { -1.0f32 } else { 1.0f32 };

    let rest = &bytes[pos..];
    if starts_with_ignore_case(rest, b"inf") {
        return Some(sign * f32::INFINITY);
    }
    if starts_with_ignore_case(rest, b"nan") {
        return Some(if negative { -f32::NAN } else { f32::NAN });
    }
    if is_hex_float(rest) {
        return parse_hex_magnitude(&rest[2..]).map(|magnitude| sign * magnitude);
    }

    let int_digits = count_digits(rest);
    let mut cursor = int_digits;
    let mut frac_digits = 0;
    if rest.get(cursor) == Some(&b'.') {
        frac_digits = count_digits(&rest[cursor + 1..]);
        cursor += 1 + frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let int_part = &text[pos..pos + int_digits];
    let frac_part = if frac_digits > 0 {
        &text[pos + int_digits + 1..pos + int_digits + 1 + frac_digits]
    } else {
        ""
    };

    // The exponent only counts if at least one digit follows the marker.
    let mut exponent = "";
    if matches!(rest.get(cursor), Some(b'e' | b'E')) {
        let mut exp_end = cursor + 1;
        if matches!(rest.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&rest[exp_end..]);
        if exp_digits > 0 {
            exponent = &text[pos + cursor + 1..pos + exp_end + exp_digits];
        }
    }

    let mut normalized = String::with_capacity(int_digits + frac_digits + exponent.len() + 4);
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }
    if !exponent.is_empty() {
        normalized.push('e');
        normalized.push_str(exponent);
    }

    let magnitude: f32 = normalized.parse().ok()?;
    if magnitude.is_infinite() {
        return None;
    }
    let has_nonzero_digit = int_part.bytes().chain(frac_part.bytes()).any(|b| b != b'0');
    if has_nonzero_digit && !magnitude.is_normal() {
        return None;
    }

    Some(sign * magnitude)
}

/// `0x` followed by a hex digit, or by a point and a hex digit. A bare `0x`
/// reads as the decimal `0`.
fn is_hex_float(bytes: &[u8]) -> bool {
    if !starts_with_ignore_case(bytes, b"0x") {
        return false;
    }
    match bytes.get(2) {
        Some(b'.') => bytes.get(3).is_some_and(u8::is_ascii_hexdigit),
        Some(b) => b.is_ascii_hexdigit(),
        None => false,
    }
}

/// Parses hex digits with an optional point and binary exponent (`p`), the
/// part of a hex float after `0x`.
fn parse_hex_magnitude(bytes: &[u8]) -> Option<f32> {
    let mut mantissa: u64 = 0;
    let mut exponent: i64 = 0;
    let mut seen_point = false;
    let mut cursor = 0;

    while let Some(&byte) = bytes.get(cursor) {
        if byte == b'.' && !seen_point {
            seen_point = true;
            cursor += 1;
            continue;
        }
        let Some(digit) = char::from(byte).to_digit(16) else {
            break;
        };
        // Digits past 60 bits are below f32 precision.
        if mantissa >> 60 == 0 {
            mantissa = (mantissa << 4) | u64::from(digit);
            if seen_point {
                exponent -= 4;
            }
        } else if !seen_point {
            exponent += 4;
        }
        cursor += 1;
    }

    // As with decimals, the exponent only counts if a digit follows the marker.
    if matches!(bytes.get(cursor), Some(b'p' | b'P')) {
        let mut exp_pos = cursor + 1;
        let negative = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                true
            }
            Some(b'+') => {
                exp_pos += 1;
                false
            }
            _ => false,
        };
        let digits = count_digits(&bytes[exp_pos..]);
        if digits > 0 {
            let value = bytes[exp_pos..exp_pos + digits]
                .iter()
                .fold(0i64, |acc, &d| (acc * 10 + i64::from(d - b'0')).min(100_000));
            exponent += if negative { -value } else { value };
        }
    }

    if mantissa == 0 {
        return Some(0.0);
    }
    let scale = 2f64.powi(exponent.clamp(-2000, 2000) as i32);
    let magnitude = (mantissa as f64 * scale) as f32;
    // Overflow, underflow and subnormals are range errors.
    if !magnitude.is_normal() {
        return None;
    }
    Some(magnitude)
}

fn starts_with_ignore_case(bytes: &[u8], word: &[u8]) -> bool {
    bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
}

/// Formats `value` with a fixed number of decimals, like `printf("%.Nf")`.
///
/// Non-finite values are spelled the way the C runtime spells them.
pub fn format_fixed(value: f32, precision: usize) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    format!("{:.*}", precision, value)
}

/// Canonical text for a float stored in a preset, six fixed decimals.
pub fn format_float(value: f32) -> String {
    format_fixed(value, 6)
}
