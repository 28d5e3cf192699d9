//! Brazilian-Portuguese number input and display helpers
//!
//! Amounts are typed as `5.000,50`: `.` groups thousands and `,` marks the
//! decimal part. These helpers turn such strings into the `f64` values the
//! engine consumes and back into display strings.

/// Keep only digits and the two separator characters
pub fn sanitize_input(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect()
}

/// Parse a pt-BR formatted number.
///
/// Every `.` is dropped, the first `,` becomes the decimal point, and the
/// longest numeric prefix (with optional exponent, `1e3`) is parsed. Empty,
/// unparseable or non-finite input (including `Infinity`) yields `0.0`.
pub fn parse_input_number(value: &str) -> f64 {
    if value.is_empty() {
        return 0.0;
    }
    let cleaned = value.replace('.', "").replacen(',', ".", 1);
    numeric_prefix(cleaned.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Longest prefix of the form `[+-]digits[.digits][(e|E)[+-]digits]`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_point = false;
    let mut valid_end = 0;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                valid_end = end + 1;
            }
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return "";
    }

    // Exponent only counts when at least one digit follows it
    if end == valid_end && matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while matches!(bytes.get(exp_end), Some(b'0'..=b'9')) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            valid_end = exp_end;
        }
    }
    &s[..valid_end]
}

/// Format for an input field: up to two decimals, no currency symbol.
/// Zero renders as an empty string so the field shows its placeholder.
pub fn format_input_number(value: f64) -> String {
    if value == 0.0 {
        return String::new();
    }
    let (sign, int_part, frac_part) = split_fixed(value);
    let frac = frac_part.trim_end_matches('0');
    let mut out = format!("{}{}", sign, group_thousands(&int_part));
    if !frac.is_empty() {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Format as Brazilian reais, e.g. `R$ 1.234,56`
pub fn format_currency(value: f64) -> String {
    let (sign, int_part, frac_part) = split_fixed(value);
    format!("{}R$ {},{}", sign, group_thousands(&int_part), frac_part)
}

/// Format a percentage with one decimal, e.g. `22,5%`
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_decimal(value, 1))
}

/// Fixed decimals with `,` as the separator and no grouping (delimited exports)
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let digits = to_fixed_abs(value, decimals);
    format!("{}{}", sign_of(value, &digits), digits.replace('.', ","))
}

/// Round to two decimals and split into sign, integer digits and fraction digits
fn split_fixed(value: f64) -> (&'static str, String, String) {
    let fixed = to_fixed_abs(value, 2);
    let sign = sign_of(value, &fixed);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    (sign, int_part.to_string(), frac_part.to_string())
}

/// `-` only when the rounded digits are non-zero, so -0.001 prints as 0.00
fn sign_of(value: f64, digits: &str) -> &'static str {
    if value < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    }
}

/// `|value|` with `decimals` fraction digits, exact midpoints rounded away from zero.
///
/// `{:.N}` already rounds the exact binary value correctly except at exact
/// midpoints, where it picks the even digit.
fn to_fixed_abs(value: f64, decimals: usize) -> String {
    let abs = value.abs();
    let rounded = format!("{:.*}", decimals, abs);

    let scaled = abs * 10f64.powi(decimals as i32);
    if !((scaled.fract() - 0.5).abs() <= 1e-6) {
        return rounded;
    }

    // Every finite f64 has at most 1074 fraction digits
    let exact = format!("{:.1100}", abs);
    let Some((int_part, frac)) = exact.split_once('.') else {
        return rounded;
    };
    let tail = &frac[decimals..];
    let is_midpoint = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_midpoint {
        return rounded;
    }

    let truncated = if decimals == 0 {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, &frac[..decimals])
    };
    increment_last_digit(&truncated)
}

/// Add one unit in the last place of a plain decimal string, carrying left
fn increment_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut i = bytes.len();
    loop {
        if i == 0 {
            bytes.insert(0, b'1');
            break;
        }
        i -= 1;
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            d => {
                bytes[i] = d + 1;
                break;
            }
        }
    }
    bytes.into_iter().map(char::from).collect()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
