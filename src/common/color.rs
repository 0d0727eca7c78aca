use std::fmt;
use serde::{Serialize, Serializer};


/// Color componenent
pub type ColorComponent = f32;

#[derive(Debug, Clone, Copy, PartialEq)]
/// RGB Color
pub struct RGB (pub ColorComponent, pub ColorComponent, pub ColorComponent);

pub const RED: RGB = RGB (1.0, 0.0, 0.0);
pub const GREEN: RGB = RGB (0.0, 0.502, 0.0);
pub const BLUE: RGB = RGB (0.0, 0.0, 1.0);
pub const GRAY: RGB = RGB (0.502, 0.502, 0.502);
pub const LIGHT_GRAY: RGB = RGB (0.827, 0.827, 0.827);
pub const LIGHT_BLUE: RGB = RGB (0.678, 0.847, 0.902);
pub const LIGHT_GREEN: RGB = RGB (0.565, 0.933, 0.565);
/// Mid tone of a blue sequential colorscale
pub const SCALE_BLUES: RGB = RGB (0.42, 0.682, 0.839);
/// Mid tone of a grey sequential colorscale
pub const SCALE_GREYS: RGB = RGB (0.588, 0.588, 0.588);

impl RGB {
    /// Hex notation used by web renderers
    pub fn to_hex(&self) -> String {
        let c = |v: ColorComponent| (v.clamp(0.0, 1.0)*255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.0), c(self.1), c(self.2))
    }
}

impl fmt::Display for RGB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}",
            trim_component(self.0),
            trim_component(self.1),
            trim_component(self.2),
        )
    }
}

fn trim_component(v: ColorComponent) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {"0".to_string()} else {s.to_string()}
}

impl Serialize for RGB {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_t0() {
        assert_eq!(RGB (0.0, 0.5, 1.0).to_string(), "0 0.5 1");
        assert_eq!(LIGHT_BLUE.to_string(), "0.678 0.847 0.902");
    }

    #[test]
    fn hex_t0() {
        assert_eq!(RED.to_hex(), "#ff0000");
        assert_eq!(GRAY.to_hex(), "#808080");
        assert_eq!(serde_json::to_string(&BLUE).unwrap(), "\"#0000ff\"");
    }
}
