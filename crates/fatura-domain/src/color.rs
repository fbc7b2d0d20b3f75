//! Company branding color transforms.
//!
//! Converts between HEX, RGB, and HSL and derives the palette variants the
//! front end applies as CSS variables. All functions are pure; parsing
//! failures fall back to the default orange rather than erroring.

use serde::Serialize;

/// Fallback brand color when a company has none configured or the stored
/// value fails to parse.
pub const DEFAULT_HEX: &str = "#FF8C42";

const DEFAULT_RGB: Rgb = Rgb {
    r: 255,
    g: 140,
    b: 66,
};

const DEFAULT_HSL: Hsl = Hsl {
    h: 20,
    s: 100,
    l: 63,
};

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL triple rounded to integer degrees / percents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    /// Hue in degrees, 0..=360.
    pub h: u16,
    /// Saturation percent, 0..=100.
    pub s: u8,
    /// Lightness percent, 0..=100.
    pub l: u8,
}

/// Parse a 6-digit HEX color, with or without a leading `#`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Rgb { r, g, b })
}

/// Format as an uppercase `#RRGGBB` string.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Parse a HEX color and convert to HSL.
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    let rgb = hex_to_rgb(hex)?;

    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
        (h, s)
    };

    Some(Hsl {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    })
}

/// Convert HSL back to an uppercase HEX string.
pub fn hsl_to_hex(hsl: Hsl) -> String {
    // Integer rounding in hex_to_hsl can land the hue on exactly 360.
    let h = (hsl.h % 360) as f64;
    let s = hsl.s.min(100) as f64 / 100.0;
    let l = hsl.l.min(100) as f64 / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u16 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    rgb_to_hex(Rgb {
        r: ((r + m) * 255.0).round() as u8,
        g: ((g + m) * 255.0).round() as u8,
        b: ((b + m) * 255.0).round() as u8,
    })
}

/// Raise lightness by `percent` points, clamped at 100.
/// Unparseable input is returned unchanged.
pub fn lighten(hex: &str, percent: u8) -> String {
    match hex_to_hsl(hex) {
        Some(hsl) => hsl_to_hex(Hsl {
            l: hsl.l.saturating_add(percent).min(100),
            ..hsl
        }),
        None => hex.to_owned(),
    }
}

/// Lower lightness by `percent` points, clamped at 0.
/// Unparseable input is returned unchanged.
pub fn darken(hex: &str, percent: u8) -> String {
    match hex_to_hsl(hex) {
        Some(hsl) => hsl_to_hex(Hsl {
            l: hsl.l.saturating_sub(percent),
            ..hsl
        }),
        None => hex.to_owned(),
    }
}

/// Pick black or white text for the given background.
///
/// Relative luminance with the 0.299/0.587/0.114 weighting, threshold 0.5.
/// Unparseable input gets white (safe on the default dark branding).
pub fn contrast_color(hex: &str) -> &'static str {
    let Some(rgb) = hex_to_rgb(hex) else {
        return "#ffffff";
    };
    let luminance =
        (0.299 * rgb.r as f64 + 0.587 * rgb.g as f64 + 0.114 * rgb.b as f64) / 255.0;
    if luminance > 0.5 { "#000000" } else { "#ffffff" }
}

/// Format as the HSL CSS-variable value the front end expects ("h s% l%").
pub fn hsl_var(hex: &str) -> String {
    let hsl = hex_to_hsl(hex).unwrap_or(DEFAULT_HSL);
    format!("{} {}% {}%", hsl.h, hsl.s, hsl.l)
}

/// All representations of one color, with orange defaults on parse failure.
#[derive(Debug, Clone, Serialize)]
pub struct ColorValues {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub rgb_string: String,
    pub hsl_string: String,
}

pub fn color_values(hex: &str) -> ColorValues {
    let rgb = hex_to_rgb(hex).unwrap_or(DEFAULT_RGB);
    let hsl = hex_to_hsl(hex).unwrap_or(DEFAULT_HSL);
    ColorValues {
        hex: hex.to_owned(),
        rgb,
        hsl,
        rgb_string: format!("{}, {}, {}", rgb.r, rgb.g, rgb.b),
        hsl_string: format!("{} {}% {}%", hsl.h, hsl.s, hsl.l),
    }
}

/// Palette derived from a base brand color.
#[derive(Debug, Clone, Serialize)]
pub struct ColorVariants {
    pub primary: String,
    /// Hover shade: 10 points darker.
    pub primary_hover: String,
    /// Light tint: 30 points less saturated, 25 points lighter.
    pub primary_light: String,
    pub primary_foreground: String,
}

pub fn color_variants(base_hex: &str) -> ColorVariants {
    let hsl = hex_to_hsl(base_hex).unwrap_or(DEFAULT_HSL);
    ColorVariants {
        primary: base_hex.to_owned(),
        primary_hover: hsl_to_hex(Hsl {
            l: hsl.l.saturating_sub(10),
            ..hsl
        }),
        primary_light: hsl_to_hex(Hsl {
            s: hsl.s.saturating_sub(30),
            l: hsl.l.saturating_add(25).min(100),
            ..hsl
        }),
        primary_foreground: "#ffffff".to_owned(),
    }
}
