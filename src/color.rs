use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FunnelError;

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#([0-9a-f]{3}|[0-9a-f]{6})$").unwrap());

/// Categorical fallback colors consulted by block index when a row does not
/// carry its own fill.
pub const DEFAULT_SCALE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Returns true for a 3- or 6-digit `#` hex string.
pub fn is_hex_color(value: &str) -> bool {
    HEX_RE.is_match(value)
}

/// Expands a three character hex code to six characters.
pub fn expand_hex(hex: &str) -> String {
    let mut out = String::with_capacity(6);
    for ch in hex.chars() {
        out.push(ch);
        out.push(ch);
    }
    out
}

/// Validates a hex color and brings it to the canonical `#rrggbb` form.
pub fn normalize_hex(color: &str) -> Result<String, FunnelError> {
    if !is_hex_color(color) {
        return Err(FunnelError::InvalidColor(color.to_string()));
    }
    let hex = color[1..].to_ascii_lowercase();
    let hex = if hex.len() == 3 { expand_hex(&hex) } else { hex };
    Ok(format!("#{hex}"))
}

fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Shades a color by the given fraction: negative values darken toward
/// black, positive values lighten toward white, zero returns the
/// normalized input.
pub fn shade(color: &str, amount: f32) -> Result<String, FunnelError> {
    let hex = normalize_hex(color)?;
    let target = if amount < 0.0 { 0.0 } else { 255.0 };
    let portion = amount.abs();

    let mut out = String::with_capacity(7);
    out.push('#');
    for channel in 0..3 {
        let start = 1 + channel * 2;
        let value = u8::from_str_radix(&hex[start..start + 2], 16)
            .map_err(|_| FunnelError::InvalidColor(color.to_string()))? as f32;
        let shifted = value + round_half_up((target - value) * portion);
        out.push_str(&format!("{:02x}", shifted as u8));
    }
    Ok(out)
}

/// Rejects an empty palette or any entry that is not well-formed hex.
pub fn validate_colors(colors: &[String]) -> Result<(), FunnelError> {
    if colors.is_empty() {
        return Err(FunnelError::InvalidColor(
            "at least one color is required".to_string(),
        ));
    }
    for color in colors {
        if !is_hex_color(color) {
            return Err(FunnelError::InvalidColor(color.clone()));
        }
    }
    Ok(())
}

/// The injected categorical scale: either a fixed color list consulted by
/// position (wrapping past the end) or a generator function.
#[derive(Clone)]
pub enum Palette {
    List(Vec<String>),
    Generator(fn(usize) -> String),
}

impl Palette {
    pub fn color_at(&self, index: usize) -> String {
        match self {
            Palette::List(colors) => colors[index % colors.len()].clone(),
            Palette::Generator(scale) => scale(index),
        }
    }

    pub fn validate(&self) -> Result<(), FunnelError> {
        match self {
            Palette::List(colors) => validate_colors(colors),
            Palette::Generator(_) => Ok(()),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::List(DEFAULT_SCALE.iter().map(|color| (*color).to_string()).collect())
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Palette::List(colors) => f.debug_tuple("List").field(colors).finish(),
            Palette::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}
