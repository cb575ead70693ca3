//! Serving-size rescaling of free-form ingredient strings.
//!
//! An ingredient is written as `[quantity] [unit] name`. Up to two leading
//! tokens are read as a quantity (`2`, `0.5`, `1/2`, or a mixed number such as
//! `1 1/2`), scaled by the serving ratio and written back as a whole number
//! followed by a simple fraction. Everything after the quantity is kept as-is.

use log::debug;

/// Tenths that cannot be written exactly as a fraction of ten and are shown
/// as the nearest third instead.
const ONE_THIRD_TENTHS: u64 = 3;
const TWO_THIRDS_TENTHS: u64 = 6;

/// Rescale every ingredient from `original_servings` to `new_servings`.
///
/// Ingredients without a leading quantity are returned unchanged. When
/// `original_servings` is zero there is no per-serving amount to compute and
/// the list is returned unchanged.
pub fn rescale<S: AsRef<str>>(
    ingredients: &[S],
    original_servings: u32,
    new_servings: u32,
) -> Vec<String> {
    ingredients
        .iter()
        .map(|ingredient| {
            rescale_ingredient(ingredient.as_ref(), original_servings, new_servings)
        })
        .collect()
}

/// Rescale a single ingredient string.
///
/// Returns the ingredient unchanged when it has no leading quantity or when
/// `original_servings` is zero.
pub fn rescale_ingredient(ingredient: &str, original_servings: u32, new_servings: u32) -> String {
    if original_servings == 0 {
        debug!("Refusing to rescale '{}' from zero servings", ingredient);
        return ingredient.to_string();
    }

    let tokens: Vec<&str> = ingredient.split(' ').collect();

    let Some((amount, consumed)) = leading_quantity(&tokens) else {
        return ingredient.to_string();
    };
    let rest = &tokens[consumed..];

    // A zero quantity is dropped rather than rescaled.
    if amount == 0.0 {
        return rest.join(" ");
    }

    let per_serving = amount / f64::from(original_servings);
    let quantity = format_amount(per_serving * f64::from(new_servings));

    let mut parts = Vec::with_capacity(rest.len() + 1);
    if !quantity.is_empty() {
        parts.push(quantity.as_str());
    }
    parts.extend_from_slice(rest);
    parts.join(" ")
}

/// Read up to two leading numeric tokens, returning their sum and how many
/// tokens were consumed.
fn leading_quantity(tokens: &[&str]) -> Option<(f64, usize)> {
    let first = tokens.first().and_then(|t| parse_quantity(t))?;

    match tokens.get(1).and_then(|t| parse_quantity(t)) {
        Some(second) => Some((first + second, 2)),
        None => Some((first, 1)),
    }
}

/// Parse a quantity token: a fraction `a/b` with non-zero integer parts, or a
/// finite integer or decimal number.
pub fn parse_quantity(token: &str) -> Option<f64> {
    if token.contains('/') {
        return parse_fraction(token);
    }

    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_fraction(token: &str) -> Option<f64> {
    let mut parts = token.split('/');
    let numerator: i64 = parts.next()?.parse().ok()?;
    let denominator: i64 = parts.next()?.parse().ok()?;

    if parts.next().is_some() || numerator == 0 || denominator == 0 {
        return None;
    }

    Some(numerator as f64 / denominator as f64)
}

/// Render an amount, rounded to one decimal place, as `"<whole> <fraction>"`.
///
/// Either part is left out when it is zero, so amounts that round to zero (or
/// below) render as an empty string.
pub fn format_amount(amount: f64) -> String {
    let Some(tenths) = round_to_tenths(amount).filter(|&t| t > 0) else {
        return String::new();
    };

    let whole = tenths / 10;
    let remainder = tenths % 10;

    let mut parts = Vec::with_capacity(2);
    if whole > 0 {
        parts.push(whole.to_string());
    }
    if remainder > 0 {
        parts.push(tenths_to_fraction(remainder));
    }
    parts.join(" ")
}

/// Round a positive amount to a whole number of tenths.
///
/// Rounding works on the exact binary value, so `0.35` (stored just below
/// 0.35) rounds down. Exact halves such as `0.25` round up.
fn round_to_tenths(amount: f64) -> Option<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }

    // Only odd multiples of 1/4 sit exactly between two tenths.
    let quarters = amount * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return Some((amount * 10.0).floor() as u64 + 1);
    }

    let rounded = format!("{:.1}", amount);
    let (whole, tenth) = rounded.split_once('.')?;
    Some(whole.parse::<u64>().ok()? * 10 + tenth.parse::<u64>().ok()?)
}

fn tenths_to_fraction(numerator: u64) -> String {
    match numerator {
        ONE_THIRD_TENTHS => "1/3".to_string(),
        TWO_THIRDS_TENTHS => "2/3".to_string(),
        _ => {
            let divisor = gcd(numerator, 10);
            format!("{}/{}", numerator / divisor, 10 / divisor)
        }
    }
}

/// Greatest common divisor (Euclid). `gcd(a, 0) == a`.
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
