//! Color resolution for flowchart styling
//!
//! Merges the fixed six-entry default palette with caller overrides and
//! derives the darkened outline shade used for node borders.

use std::collections::BTreeMap;

/// Caller-supplied palette overrides, keyed by index `"1".."6"`
pub type ColorOverrides = BTreeMap<String, String>;

/// The built-in palette, matching the canvas color indices
pub const DEFAULT_PALETTE: [(&str, &str); 6] = [
    ("1", "#fb464c"), // red
    ("2", "#e9973f"), // orange
    ("3", "#e0de71"), // yellow
    ("4", "#44cf6e"), // green
    ("5", "#53dfdd"), // cyan
    ("6", "#a882ff"), // purple
];

/// A resolved palette: defaults plus overrides, built once per conversion
#[derive(Debug, Clone)]
pub struct ColorMap {
    map: BTreeMap<String, String>,
}

impl ColorMap {
    /// Build a color map from the defaults and the given overrides
    ///
    /// Overrides win per key; unspecified indices keep their defaults.
    pub fn with_overrides(overrides: &ColorOverrides) -> Self {
        let mut map: BTreeMap<String, String> = DEFAULT_PALETTE
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        for (key, value) in overrides {
            map.insert(key.clone(), value.clone());
        }
        Self { map }
    }

    /// Resolve a color token
    ///
    /// Palette indices map to their hex value; anything else passes through
    /// unchanged, so literal colors like `#248a42` work as-is.
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.map.get(token).map(String::as_str).unwrap_or(token)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::with_overrides(&ColorOverrides::new())
    }
}

/// Shift the brightness of a hex color by a percentage
///
/// Each RGB channel moves by `round(2.55 * percent)` and is clamped to
/// `[0, 255]`; negative percentages darken. A value that does not parse as
/// a 6-digit hex color is returned unchanged.
pub fn adjust_brightness(color: &str, percent: f64) -> String {
    let digits = color.strip_prefix('#').unwrap_or(color);
    let Some((r, g, b)) = parse_hex_channels(digits) else {
        return color.to_string();
    };

    let amount = (2.55 * percent).round() as i32;
    let shift = |channel: u8| (i32::from(channel) + amount).clamp(0, 255) as u8;

    format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b))
}

fn parse_hex_channels(digits: &str) -> Option<(u8, u8, u8)> {
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
