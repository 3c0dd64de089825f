//! Unit conversions and standards of fill
//!
//! Container sizes: 27 CFR 5.47a (spirits), 27 CFR 4.71 (wine). Malt
//! beverages have no standards of fill (27 CFR 7.70) — any size is valid.

use crate::{ProductCategory, RulesError, RulesResult};

/// Conversion factors from labeled units to milliliters
pub const UNIT_TO_ML: &[(&str, f64)] = &[
    ("ml", 1.0),
    ("milliliter", 1.0),
    ("milliliters", 1.0),
    ("l", 1000.0),
    ("liter", 1000.0),
    ("liters", 1000.0),
    ("litre", 1000.0),
    ("litres", 1000.0),
    ("fl oz", 29.5735),
    ("oz", 29.5735),
    ("ounce", 29.5735),
    ("ounces", 29.5735),
    ("fluid ounce", 29.5735),
    ("fluid ounces", 29.5735),
    ("pt", 473.176),
    ("pint", 473.176),
    ("pints", 473.176),
    ("qt", 946.353),
    ("quart", 946.353),
    ("quarts", 946.353),
    ("gal", 3785.41),
    ("gallon", 3785.41),
    ("gallons", 3785.41),
];

/// Approved distilled spirits container sizes in ml (27 CFR 5.47a)
pub const SPIRITS_STANDARD_SIZES_ML: &[f64] = &[
    3750.0, 3000.0, 2000.0, 1800.0, 1750.0, 1500.0, 1000.0, 945.0, 900.0, 750.0, 720.0, 710.0,
    700.0, 570.0, 500.0, 475.0, 375.0, 355.0, 350.0, 331.0, 250.0, 200.0, 187.0, 100.0, 50.0,
];

/// Approved wine container sizes in ml (27 CFR 4.71)
pub const WINE_STANDARD_SIZES_ML: &[f64] = &[
    3000.0, 2250.0, 1800.0, 1500.0, 1000.0, 750.0, 720.0, 700.0, 620.0, 600.0, 568.0, 550.0,
    500.0, 473.0, 375.0, 360.0, 355.0, 330.0, 300.0, 250.0, 200.0, 187.0, 180.0, 100.0, 50.0,
];

/// Convert a labeled volume to milliliters
pub fn to_ml(amount: f64, unit: &str) -> RulesResult<f64> {
    let unit = unit.trim().to_lowercase();
    UNIT_TO_ML
        .iter()
        .find(|(u, _)| *u == unit)
        .map(|(_, factor)| amount * factor)
        .ok_or(RulesError::UnknownUnit(unit))
}

/// Approved sizes for a category; None for beer, which has no standards of fill
pub fn standard_sizes(category: ProductCategory) -> Option<&'static [f64]> {
    match category {
        ProductCategory::Spirits => Some(SPIRITS_STANDARD_SIZES_ML),
        ProductCategory::Wine => Some(WINE_STANDARD_SIZES_ML),
        ProductCategory::Beer => None,
    }
}

/// Check whether a volume is an approved standard size for the category
///
/// Tolerance absorbs unit-conversion rounding. Beer always passes.
pub fn is_standard_size(volume_ml: f64, category: ProductCategory, tolerance: f64) -> bool {
    match standard_sizes(category) {
        None => true,
        Some(sizes) => sizes.iter().any(|s| (volume_ml - s).abs() <= tolerance),
    }
}
