// src/extractors/text.rs
//! Text cleanup and the site's numeric encodings (mixed fractions, feet-inches).

use unicode_normalization::UnicodeNormalization;

const FRACTION_SLASH: char = '⁄';
const PRIME: char = '′';
const DOUBLE_PRIME: &str = "′′";

/// Normalizes (NFKC) and strips `\r`, `\n`, `*` and surrounding whitespace.
///
/// NFKC folds the super/subscript digits of `5¹⁄₂` into `51⁄2` and `″` into
/// `′′`, which is the shape [`to_number`] and [`to_feet_inches_float`] expect.
pub fn clean_text(s: &str) -> String {
    let stripped: String = s
        .nfkc()
        .filter(|c| !matches!(c, '\r' | '\n' | '*'))
        .collect();
    // Dropping characters can bring combining marks next to a new base.
    stripped.nfkc().collect::<String>().trim().to_string()
}

/// Result of [`to_number`]: either a value or the untouched token.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric<'a> {
    Value(f64),
    Raw(&'a str),
}

impl Numeric<'_> {
    pub fn value(&self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(*v),
            Numeric::Raw(_) => None,
        }
    }
}

fn is_plain_number(token: &str) -> bool {
    let mut parts = token.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let frac = parts.next();
    !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && frac.map_or(true, |f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}

/// `<leading><digit>⁄<denominator>`, e.g. `51⁄2` is 5 + 1/2.
fn mixed_fraction(token: &str) -> Option<f64> {
    let (head, _) = token.split_once(FRACTION_SLASH)?;
    let denominator = token.rsplit(FRACTION_SLASH).next()?;
    let numerator = head.chars().last()?;
    let leading = &head[..head.len() - numerator.len_utf8()];

    let whole: f64 = leading.trim().parse().ok()?;
    let numerator = numerator.to_digit(10)? as f64;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(whole + numerator / denominator)
}

/// Parses a plain number or a mixed fraction; anything else comes back raw.
pub fn to_number(token: &str) -> Numeric<'_> {
    if is_plain_number(token) {
        return token.parse().map_or(Numeric::Raw(token), Numeric::Value);
    }
    if token.contains(FRACTION_SLASH) {
        if let Some(v) = mixed_fraction(token) {
            return Numeric::Value(v);
        }
        if let Ok(v) = token.parse::<f64>() {
            return Numeric::Value(v);
        }
    }
    Numeric::Raw(token)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Converts `5′10′′` (or bare inches, `70`) into decimal feet, two places.
pub fn to_feet_inches_float(measurement: &str) -> Option<f64> {
    let primed = || -> Option<f64> {
        let mut parts = measurement.split(PRIME);
        let feet: f64 = clean_text(parts.next()?).parse().ok()?;
        let inches = clean_text(&parts.next()?.replace(DOUBLE_PRIME, ""));
        let inches = to_number(&inches).value()?;
        Some(round2((feet * 12.0 + inches) / 12.0))
    };

    primed().or_else(|| {
        let inches = clean_text(&measurement.replace(DOUBLE_PRIME, ""));
        to_number(&inches).value().map(|v| round2(v / 12.0))
    })
}

/// Integer centimetres from the right side of `<feet-inches> / <n>cm`.
pub fn to_centimeters(measurement: &str) -> Option<u32> {
    let (_, metric) = measurement.split_once('/')?;
    let before_cm = metric.split("cm").next()?;
    let digits: String = before_cm.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Decimal feet and centimetres from `<feet-inches> / <n>cm`, each side on its own.
pub fn measurement_units(raw: &str) -> (Option<f64>, Option<u32>) {
    let imperial = raw.split('/').next().map(clean_text);
    let feet = imperial.as_deref().and_then(to_feet_inches_float);
    (feet, to_centimeters(raw))
}

/// Start and end year from `"YYYY-YYYY"`.
pub fn career_years(span: &str) -> Option<(i32, i32)> {
    let mut parts = span.split('-');
    let start = parts.next()?.trim().parse().ok()?;
    let end = parts.next()?.trim().parse().ok()?;
    Some((start, end))
}
