use serde::{Deserialize, Serialize};

use crate::geom::ShellError;

/// Linear RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f64; 4]);

impl Rgba {
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);

    /// Parses `#rrggbb` (the leading `#` is optional). Alpha is always 1.
    pub fn from_hex(value: &str) -> Result<Self, ShellError> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ShellError::invalid(
                "color",
                format!("expected #rrggbb, got `{value}`"),
            ));
        }

        let mut rgba = [0.0, 0.0, 0.0, 1.0];
        for (slot, start) in rgba.iter_mut().zip([0, 2, 4]) {
            let byte = u8::from_str_radix(&hex[start..start + 2], 16).map_err(|_| {
                ShellError::invalid("color", format!("expected #rrggbb, got `{value}`"))
            })?;
            *slot = f64::from(byte) / 255.0;
        }
        Ok(Self(rgba))
    }

    /// Formats the RGB part back as `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let c = Rgba::from_hex("#ff8000").expect("valid hex");
        assert_eq!(c.0[0], 1.0);
        assert!((c.0[1] - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(c.0[2], 0.0);
        assert_eq!(c.0[3], 1.0);
        assert_eq!(Rgba::from_hex("FFFFFF").expect("valid hex"), Rgba::WHITE);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["#fff", "#gg0000", "", "#12345678", "#ééé", "#+f0000", "ff+f00"] {
            assert!(
                matches!(Rgba::from_hex(bad), Err(ShellError::InvalidParameter { name: "color", .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(Rgba::from_hex("#1a2b3c").expect("valid hex").to_hex(), "#1a2b3c");
    }
}
