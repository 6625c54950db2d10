//! Number to text conversions with ECMAScript rounding and layout.
//!
//! Fixed and significant-digit rounding work on the exact decimal expansion of
//! the binary value, so ties resolve away from zero the way `toFixed` does.

/// Enough fraction digits to print any finite `f64` exactly.
const EXACT_PRECISION: usize = 1100;

/// Non-negative finite value as `0.d1 d2 d3 ... × 10^point`.
/// `digits` has neither leading nor trailing zeros; zero has no digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    digits: Vec<u8>,
    point: i32,
}

impl Decimal {
    fn exact(value: f64) -> Self {
        let text = format!("{:.*}", EXACT_PRECISION, value.abs());
        let (integral, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let mut digits: Vec<u8> = integral
            .bytes()
            .chain(fraction.bytes())
            .map(|b| b - b'0')
            .collect();
        let mut point = integral.len() as i32;

        let leading = digits.iter().take_while(|d| **d == 0).count();
        digits.drain(..leading);
        point -= leading as i32;
        while digits.last() == Some(&0) {
            digits.pop();
        }
        if digits.is_empty() {
            point = 0;
        }

        Self { digits, point }
    }

    /// Shortest digits that round-trip, as produced by `{:e}`.
    fn shortest(value: f64) -> Self {
        let text = format!("{:e}", value.abs());
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }
        if digits.is_empty() {
            return Self { digits, point: 0 }
        }
        Self { digits, point: exponent + 1 }
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Exactly `count` significant digits (`count >= 1`) and the scientific exponent.
    fn significant(&self, count: usize) -> (Vec<u8>, i32) {
        if self.is_zero() {
            return (vec![0; count], 0)
        }
        let mut kept: Vec<u8> = (0..count)
            .map(|i| self.digits.get(i).copied().unwrap_or(0))
            .collect();
        let mut exponent = self.point - 1;
        if self.digits.get(count).map_or(false, |d| *d >= 5) && increment(&mut kept) {
            kept.insert(0, 1);
            kept.pop();
            exponent += 1;
        }
        (kept, exponent)
    }

    /// Integer `n` closest to `value × 10^fraction`, larger on ties, as a digit string.
    fn scaled_integer(&self, fraction: usize) -> Vec<u8> {
        let keep = self.point + fraction as i32;
        if keep < 0 || self.is_zero() {
            return vec![0]
        }
        let keep = keep as usize;
        let mut kept: Vec<u8> = (0..keep)
            .map(|i| self.digits.get(i).copied().unwrap_or(0))
            .collect();
        if self.digits.get(keep).map_or(false, |d| *d >= 5) && increment(&mut kept) {
            kept.insert(0, 1);
        }
        let leading = kept.iter().take_while(|d| **d == 0).count();
        kept.drain(..leading.min(kept.len().saturating_sub(1)));
        if kept.is_empty() {
            kept.push(0);
        }
        kept
    }
}

/// Adds one to a digit string; true when the carry runs off the front.
fn increment(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false
        }
    }
    true
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

fn exponent_suffix(exponent: i32) -> String {
    if exponent >= 0 {
        format!("e+{exponent}")
    } else {
        format!("e-{}", -exponent)
    }
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        None
    }
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// `Number::toString(value)` in radix 10.
pub fn to_js_string(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return text
    }
    if value == 0.0 {
        return "0".to_string()
    }

    let decimal = Decimal::shortest(value);
    let digits = render(&decimal.digits);
    let k = digits.len() as i32;
    let n = decimal.point;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (head, tail) = digits.split_at(n as usize);
        format!("{head}.{tail}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{head}{}", exponent_suffix(n - 1))
        } else {
            format!("{head}.{tail}{}", exponent_suffix(n - 1))
        }
    };

    format!("{}{body}", sign(value))
}

/// `Number.prototype.toFixed` once `fraction` is known to lie in `0..=100`.
pub fn to_fixed(value: f64, fraction: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string()
    }
    if value.abs() >= 1e21 || value.is_infinite() {
        return to_js_string(value)
    }

    let mut digits = render(&Decimal::exact(value).scaled_integer(fraction));
    if fraction > 0 {
        if digits.len() <= fraction {
            digits = format!("{}{digits}", "0".repeat(fraction + 1 - digits.len()));
        }
        digits.insert(digits.len() - fraction, '.');
    }
    format!("{}{digits}", sign(value))
}

/// `Number.prototype.toExponential`; `None` asks for as many digits as needed.
pub fn to_exponential(value: f64, fraction: Option<usize>) -> String {
    if let Some(text) = non_finite(value) {
        return text
    }

    let (digits, exponent) = match fraction {
        Some(fraction) => Decimal::exact(value).significant(fraction + 1),
        None if value == 0.0 => (vec![0], 0),
        None => {
            let shortest = Decimal::shortest(value);
            let exponent = shortest.point - 1;
            (shortest.digits, exponent)
        }
    };

    let digits = render(&digits);
    let (head, tail) = digits.split_at(1);
    let mantissa = if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head}.{tail}")
    };
    format!("{}{mantissa}{}", sign(value), exponent_suffix(exponent))
}

/// `Number.prototype.toPrecision` once `precision` is known to lie in `1..=100`.
pub fn to_precision(value: f64, precision: usize) -> String {
    if let Some(text) = non_finite(value) {
        return text
    }

    let (digits, exponent) = Decimal::exact(value).significant(precision);
    let digits = render(&digits);
    let p = precision as i32;

    let body = if exponent < -6 || exponent >= p {
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{head}{}", exponent_suffix(exponent))
        } else {
            format!("{head}.{tail}{}", exponent_suffix(exponent))
        }
    } else if exponent == p - 1 {
        digits
    } else if exponent >= 0 {
        let (head, tail) = digits.split_at(exponent as usize + 1);
        format!("{head}.{tail}")
    } else {
        format!("0.{}{digits}", "0".repeat((-(exponent + 1)) as usize))
    };

    format!("{}{body}", sign(value))
}

/// `Number.prototype.toString(radix)` for a radix other than 10.
pub fn to_radix_string(value: f64, radix: u32) -> String {
    if let Some(text) = non_finite(value) {
        return text
    }
    if value == 0.0 {
        return "0".to_string()
    }

    // a binary fraction always terminates within this many digits in radix 2.
    const MAX_FRACTION_DIGITS: usize = 1100;
    let base = f64::from(radix);
    let magnitude = value.abs();
    let mut integral = magnitude.trunc();
    let mut fraction = magnitude - integral;

    let mut head = Vec::new();
    if integral == 0.0 {
        head.push('0');
    }
    while integral >= 1.0 {
        let digit = (integral % base) as u32;
        head.push(std::char::from_digit(digit, radix).unwrap_or('0'));
        integral = ((integral - f64::from(digit)) / base).trunc();
    }
    head.reverse();

    let mut tail = String::new();
    while fraction > 0.0 && tail.len() < MAX_FRACTION_DIGITS {
        fraction *= base;
        let digit = fraction.trunc();
        fraction -= digit;
        tail.push(std::char::from_digit(digit as u32, radix).unwrap_or('0'));
        // past 52 significant bits the remaining digits are rounding noise.
        if radix != 2 && radix != 4 && radix != 8 && radix != 16 && radix != 32 && tail.len() >= 20 {
            break
        }
    }
    while tail.ends_with('0') {
        tail.pop();
    }

    let head: String = head.into_iter().collect();
    if tail.is_empty() {
        format!("{}{head}", sign(value))
    } else {
        format!("{}{head}.{tail}", sign(value))
    }
}

/// `Number.prototype.toLocaleString()` for the `en-US` locale.
///
/// Rounds the shortest round-trip digits to three fraction digits, so large
/// magnitudes print as a full grouped integer rather than in exponent form.
pub fn to_locale_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string()
    }
    if value.is_infinite() {
        return format!("{}∞", sign(value))
    }

    let mut scaled = render(&Decimal::shortest(value).scaled_integer(3));
    while scaled.len() < 4 {
        scaled.insert(0, '0');
    }
    let (integral, fraction) = scaled.split_at(scaled.len() - 3);
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, c) in integral.chars().enumerate() {
        if i > 0 && (integral.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let prefix = if value.is_sign_negative() { "-" } else { "" };
    if fraction.is_empty() {
        format!("{prefix}{grouped}")
    } else {
        format!("{prefix}{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_string_layout() {
        assert_eq!(to_js_string(42.0), "42");
        assert_eq!(to_js_string(-0.0), "0");
        assert_eq!(to_js_string(0.1), "0.1");
        assert_eq!(to_js_string(123.456), "123.456");
        assert_eq!(to_js_string(1e21), "1e+21");
        assert_eq!(to_js_string(1e20), "100000000000000000000");
        assert_eq!(to_js_string(0.000001), "0.000001");
        assert_eq!(to_js_string(1e-7), "1e-7");
        assert_eq!(to_js_string(-1.5e-10), "-1.5e-10");
        assert_eq!(to_js_string(f64::NAN), "NaN");
        assert_eq!(to_js_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn fixed_rounds_ties_up() {
        assert_eq!(to_fixed(42.0, 1), "42.0");
        assert_eq!(to_fixed(3.14159, 2), "3.14");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.000001, 2), "0.00");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(99.99, 1), "100.0");
        assert_eq!(to_fixed(1e21, 2), "1e+21");
    }

    #[test]
    fn exponential() {
        assert_eq!(to_exponential(123456.0, Some(2)), "1.23e+5");
        assert_eq!(to_exponential(123456.0, None), "1.23456e+5");
        assert_eq!(to_exponential(0.00015, Some(1)), "1.5e-4");
        assert_eq!(to_exponential(0.0, None), "0e+0");
        assert_eq!(to_exponential(9.99, Some(1)), "1.0e+1");
        assert_eq!(to_exponential(-5.0, Some(0)), "-5e+0");
    }

    #[test]
    fn precision() {
        assert_eq!(to_precision(123.456, 5), "123.46");
        assert_eq!(to_precision(0.0012345, 3), "0.00123");
        assert_eq!(to_precision(123456.0, 2), "1.2e+5");
        assert_eq!(to_precision(0.0, 3), "0.00");
        assert_eq!(to_precision(1e-7, 1), "1e-7");
        assert_eq!(to_precision(42.0, 2), "42");
    }

    #[test]
    fn radix() {
        assert_eq!(to_radix_string(255.0, 16), "ff");
        assert_eq!(to_radix_string(8.0, 2), "1000");
        assert_eq!(to_radix_string(-35.0, 36), "-z");
        assert_eq!(to_radix_string(0.5, 2), "0.1");
        assert_eq!(to_radix_string(10.25, 16), "a.4");
    }

    #[test]
    fn locale_never_uses_exponent_form() {
        assert_eq!(to_locale_string(1e21), "1,000,000,000,000,000,000,000");
        assert_eq!(to_locale_string(1.5e22), "15,000,000,000,000,000,000,000");
        assert_eq!(to_locale_string(-1e23), "-100,000,000,000,000,000,000,000");
        assert_eq!(to_locale_string(1e-7), "0");
    }

    #[test]
    fn locale() {
        assert_eq!(to_locale_string(1234567.891), "1,234,567.891");
        assert_eq!(to_locale_string(1234.5), "1,234.5");
        assert_eq!(to_locale_string(-999.9996), "-1,000");
        assert_eq!(to_locale_string(12.0), "12");
        assert_eq!(to_locale_string(0.0004), "0");
        assert_eq!(to_locale_string(0.0005), "0.001");
        assert_eq!(to_locale_string(1.0005), "1.001");
    }
}
