//! Numeric extraction from label text
//!
//! Regex-driven recovery of alcohol strength and volume statements, with
//! plausibility bounds. Patterns live in the shared registry in `lv-rules`.

use lv_rules::patterns::{ABV_PATTERNS, VOLUME_RE};
use lv_rules::units;
use tracing::debug;

/// Plausible ABV range; matches outside it are rejected and the next
/// pattern is tried
const ABV_MIN: f64 = 0.5;
const ABV_MAX: f64 = 95.0;

/// Extract alcohol by volume from free text
///
/// Tries the ordered pattern list and accepts the first plausible value.
/// Handles "45% ALC/VOL", "13.5% ABV", "40 percent alcohol", and
/// alcohol-adjacent percentages within a bounded window.
pub fn extract_abv(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();

    for (i, pattern) in ABV_PATTERNS.iter().enumerate() {
        let Some(caps) = pattern.captures(&lower) else {
            continue;
        };
        let Ok(value) = caps[1].parse::<f64>() else {
            continue;
        };
        if (ABV_MIN..=ABV_MAX).contains(&value) {
            debug!(pattern = i + 1, value, "ABV extracted");
            return Some(value);
        }
        debug!(pattern = i + 1, value, "ABV candidate outside plausible range");
    }

    None
}

/// Extract a volume statement as (amount, unit)
///
/// The unit is normalized to single internal spaces ("fl  oz" -> "fl oz")
/// but otherwise returned as written.
pub fn extract_volume(text: &str) -> Option<(f64, String)> {
    let lower = text.to_lowercase();
    let caps = VOLUME_RE.captures(&lower)?;
    let amount = caps[1].parse::<f64>().ok()?;
    let unit = caps[2].split_whitespace().collect::<Vec<_>>().join(" ");
    Some((amount, unit))
}

/// Parse a net-contents statement straight to milliliters
pub fn parse_net_contents(text: &str) -> Option<f64> {
    let (amount, unit) = extract_volume(text)?;
    units::to_ml(amount, &unit).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abv_standard_formats() {
        assert_eq!(extract_abv("45% ALC/VOL"), Some(45.0));
        assert_eq!(extract_abv("13.5% ABV"), Some(13.5));
        assert_eq!(extract_abv("40 percent alcohol"), Some(40.0));
        assert_eq!(extract_abv("alcohol by volume 12.5%"), Some(12.5));
    }

    #[test]
    fn test_abv_requires_alcohol_context() {
        // a bare percentage is not an ABV statement
        assert_eq!(extract_abv("100% satisfaction guaranteed"), None);
        assert_eq!(extract_abv("no strength given"), None);
    }

    #[test]
    fn test_abv_rejects_implausible_values() {
        assert_eq!(extract_abv("99% ALC/VOL"), None);
        assert_eq!(extract_abv("0.2% ABV"), None);
    }

    #[test]
    fn test_volume_units() {
        assert_eq!(extract_volume("750 mL"), Some((750.0, "ml".to_string())));
        assert_eq!(extract_volume("1 Liter"), Some((1.0, "liter".to_string())));
        assert_eq!(
            extract_volume("25.4 FL OZ"),
            Some((25.4, "fl oz".to_string()))
        );
    }

    #[test]
    fn test_parse_net_contents() {
        assert_eq!(parse_net_contents("750 mL"), Some(750.0));
        assert_eq!(parse_net_contents("1 L"), Some(1000.0));
        assert_eq!(parse_net_contents("not a volume"), None);
        assert_eq!(parse_net_contents(""), None);
    }
}
