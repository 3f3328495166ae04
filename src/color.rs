//! Color utilities: hex conversion, luminance and contrast.

use palette::Srgb;

use crate::error::ValidationError;

/// An 8-bit sRGB color.
pub type Rgb = Srgb<u8>;

pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Channel offset applied by [`complementary`].
const COMPLEMENT_SHIFT: u8 = 100;

/// Formats a color as lowercase `#rrggbb`.
pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Parses a 6-digit `#RRGGBB` color (case-insensitive, `#` required).
pub fn parse_hex(hex: &str) -> Result<Rgb, ValidationError> {
    let invalid = || ValidationError::InvalidColor(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    digits.parse::<Rgb>().map_err(|_| invalid())
}

/// sRGB channel to linear light, using the WCAG 2.0 breakpoint.
fn linearize(c: f32) -> f32 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`.
pub fn relative_luminance(color: Rgb) -> f32 {
    let c: Srgb<f32> = color.into_format();
    0.2126 * linearize(c.red) + 0.7152 * linearize(c.green) + 0.0722 * linearize(c.blue)
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f32 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Perceived brightness (`0.299R + 0.587G + 0.114B`) normalized to `[0, 1]`.
pub fn perceived_luminance(color: Rgb) -> f32 {
    (0.299 * color.red as f32 + 0.587 * color.green as f32 + 0.114 * color.blue as f32) / 255.0
}

/// A background that stands apart from `color`.
///
/// Bright colors are darkened and dark colors lightened by a fixed channel
/// offset, saturating at the channel bounds.
pub fn complementary(color: Rgb) -> Rgb {
    let shift = |c: u8| {
        if perceived_luminance(color) > 0.5 {
            c.saturating_sub(COMPLEMENT_SHIFT)
        } else {
            c.saturating_add(COMPLEMENT_SHIFT)
        }
    };
    Rgb::new(shift(color.red), shift(color.green), shift(color.blue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_roundtrip_is_lowercase() {
        let c = parse_hex("#0000FF").unwrap();
        assert_eq!(c, Rgb::new(0, 0, 255));
        assert_eq!(to_hex(c), "#0000ff");
        assert_eq!(to_hex(WHITE), "#ffffff");
    }

    #[test]
    fn parse_hex_rejects_malformed() {
        for bad in ["", "#", "0000ff", "#fff", "#00000g", "#0000ff00", "#+00000"] {
            assert!(parse_hex(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn contrast_extremes() {
        let black = Rgb::new(0, 0, 0);
        assert!((contrast_ratio(black, WHITE) - 21.0).abs() < 0.01);
        assert!((contrast_ratio(WHITE, WHITE) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn blue_red_contrast_exceeds_threshold() {
        let ratio = contrast_ratio(Rgb::new(0, 0, 255), Rgb::new(255, 0, 0));
        assert!(ratio > 1.5, "got {ratio}");
    }

    #[test]
    fn complementary_darkens_bright_and_lightens_dark() {
        assert_eq!(complementary(Rgb::new(200, 220, 90)), Rgb::new(100, 120, 0));
        assert_eq!(complementary(Rgb::new(20, 180, 30)), Rgb::new(120, 255, 130));
        // 128 gray sits just above the threshold
        assert_eq!(complementary(Rgb::new(128, 128, 128)), Rgb::new(28, 28, 28));
        assert_eq!(complementary(Rgb::new(127, 127, 127)), Rgb::new(227, 227, 227));
    }

    proptest! {
        #[test]
        fn contrast_is_symmetric_and_bounded(a in any::<[u8; 3]>(), b in any::<[u8; 3]>()) {
            let a = Rgb::new(a[0], a[1], a[2]);
            let b = Rgb::new(b[0], b[1], b[2]);
            let ab = contrast_ratio(a, b);
            prop_assert!((ab - contrast_ratio(b, a)).abs() < 1e-5);
            prop_assert!(ab >= 1.0 && ab <= 21.01);
        }

        #[test]
        fn hex_formatting_parses_back(c in any::<[u8; 3]>()) {
            let color = Rgb::new(c[0], c[1], c[2]);
            let hex = to_hex(color);
            prop_assert_eq!(hex.len(), 7);
            prop_assert_eq!(parse_hex(&hex).unwrap(), color);
        }
    }
}
