//! Colour values passed through to the display.
//!
//! The display only needs an integer hue and a packed colour; this module turns the configured
//! colour name into that packed value. Names follow the 141-entry web colour table and are
//! matched case-insensitively. Unknown names resolve to [`Rgb::EMPTY`], which packs to zero.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hue presets understood by the display firmware (0-255 colour wheel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum HsvHue {
    Red = 0,
    Orange = 32,
    Yellow = 64,
    Green = 96,
    Aqua = 128,
    Blue = 160,
    Purple = 192,
    Pink = 224,
}

impl HsvHue {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// An opaque 24-bit colour, or the empty colour produced by an unknown name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// False only for [`Rgb::EMPTY`]
    pub known: bool,
}

impl Rgb {
    pub const EMPTY: Rgb = Rgb {
        r: 0,
        g: 0,
        b: 0,
        known: false,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, known: true }
    }

    /// Looks up a colour by name, returning [`Rgb::EMPTY`] when the name is not recognised.
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_ascii_lowercase();
        NAMED_COLORS
            .binary_search_by(|(candidate, _)| candidate.to_ascii_lowercase().as_str().cmp(wanted.as_str()))
            .map(|index| NAMED_COLORS[index].1)
            .unwrap_or(Rgb::EMPTY)
    }

    /// Packs the colour as signed 32-bit ARGB with a fully opaque alpha channel.
    pub fn to_argb(self) -> i32 {
        if !self.known {
            return 0;
        }
        let packed = 0xFF00_0000u32 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32;
        packed as i32
    }

    /// The non-negative packed value carried in a [`crate::encoder::Metric`].
    pub fn display_argb(self) -> i32 {
        self.to_argb().wrapping_abs()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.known {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "Empty")
        }
    }
}

/// Web colour names, sorted case-insensitively for binary search
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("AliceBlue", Rgb::new(0xF0, 0xF8, 0xFF)),
    ("AntiqueWhite", Rgb::new(0xFA, 0xEB, 0xD7)),
    ("Aqua", Rgb::new(0x00, 0xFF, 0xFF)),
    ("Aquamarine", Rgb::new(0x7F, 0xFF, 0xD4)),
    ("Azure", Rgb::new(0xF0, 0xFF, 0xFF)),
    ("Beige", Rgb::new(0xF5, 0xF5, 0xDC)),
    ("Bisque", Rgb::new(0xFF, 0xE4, 0xC4)),
    ("Black", Rgb::new(0x00, 0x00, 0x00)),
    ("BlanchedAlmond", Rgb::new(0xFF, 0xEB, 0xCD)),
    ("Blue", Rgb::new(0x00, 0x00, 0xFF)),
    ("BlueViolet", Rgb::new(0x8A, 0x2B, 0xE2)),
    ("Brown", Rgb::new(0xA5, 0x2A, 0x2A)),
    ("BurlyWood", Rgb::new(0xDE, 0xB8, 0x87)),
    ("CadetBlue", Rgb::new(0x5F, 0x9E, 0xA0)),
    ("Chartreuse", Rgb::new(0x7F, 0xFF, 0x00)),
    ("Chocolate", Rgb::new(0xD2, 0x69, 0x1E)),
    ("Coral", Rgb::new(0xFF, 0x7F, 0x50)),
    ("CornflowerBlue", Rgb::new(0x64, 0x95, 0xED)),
    ("Cornsilk", Rgb::new(0xFF, 0xF8, 0xDC)),
    ("Crimson", Rgb::new(0xDC, 0x14, 0x3C)),
    ("Cyan", Rgb::new(0x00, 0xFF, 0xFF)),
    ("DarkBlue", Rgb::new(0x00, 0x00, 0x8B)),
    ("DarkCyan", Rgb::new(0x00, 0x8B, 0x8B)),
    ("DarkGoldenrod", Rgb::new(0xB8, 0x86, 0x0B)),
    ("DarkGray", Rgb::new(0xA9, 0xA9, 0xA9)),
    ("DarkGreen", Rgb::new(0x00, 0x64, 0x00)),
    ("DarkKhaki", Rgb::new(0xBD, 0xB7, 0x6B)),
    ("DarkMagenta", Rgb::new(0x8B, 0x00, 0x8B)),
    ("DarkOliveGreen", Rgb::new(0x55, 0x6B, 0x2F)),
    ("DarkOrange", Rgb::new(0xFF, 0x8C, 0x00)),
    ("DarkOrchid", Rgb::new(0x99, 0x32, 0xCC)),
    ("DarkRed", Rgb::new(0x8B, 0x00, 0x00)),
    ("DarkSalmon", Rgb::new(0xE9, 0x96, 0x7A)),
    ("DarkSeaGreen", Rgb::new(0x8F, 0xBC, 0x8F)),
    ("DarkSlateBlue", Rgb::new(0x48, 0x3D, 0x8B)),
    ("DarkSlateGray", Rgb::new(0x2F, 0x4F, 0x4F)),
    ("DarkTurquoise", Rgb::new(0x00, 0xCE, 0xD1)),
    ("DarkViolet", Rgb::new(0x94, 0x00, 0xD3)),
    ("DeepPink", Rgb::new(0xFF, 0x14, 0x93)),
    ("DeepSkyBlue", Rgb::new(0x00, 0xBF, 0xFF)),
    ("DimGray", Rgb::new(0x69, 0x69, 0x69)),
    ("DodgerBlue", Rgb::new(0x1E, 0x90, 0xFF)),
    ("Firebrick", Rgb::new(0xB2, 0x22, 0x22)),
    ("FloralWhite", Rgb::new(0xFF, 0xFA, 0xF0)),
    ("ForestGreen", Rgb::new(0x22, 0x8B, 0x22)),
    ("Fuchsia", Rgb::new(0xFF, 0x00, 0xFF)),
    ("Gainsboro", Rgb::new(0xDC, 0xDC, 0xDC)),
    ("GhostWhite", Rgb::new(0xF8, 0xF8, 0xFF)),
    ("Gold", Rgb::new(0xFF, 0xD7, 0x00)),
    ("Goldenrod", Rgb::new(0xDA, 0xA5, 0x20)),
    ("Gray", Rgb::new(0x80, 0x80, 0x80)),
    ("Green", Rgb::new(0x00, 0x80, 0x00)),
    ("GreenYellow", Rgb::new(0xAD, 0xFF, 0x2F)),
    ("Honeydew", Rgb::new(0xF0, 0xFF, 0xF0)),
    ("HotPink", Rgb::new(0xFF, 0x69, 0xB4)),
    ("IndianRed", Rgb::new(0xCD, 0x5C, 0x5C)),
    ("Indigo", Rgb::new(0x4B, 0x00, 0x82)),
    ("Ivory", Rgb::new(0xFF, 0xFF, 0xF0)),
    ("Khaki", Rgb::new(0xF0, 0xE6, 0x8C)),
    ("Lavender", Rgb::new(0xE6, 0xE6, 0xFA)),
    ("LavenderBlush", Rgb::new(0xFF, 0xF0, 0xF5)),
    ("LawnGreen", Rgb::new(0x7C, 0xFC, 0x00)),
    ("LemonChiffon", Rgb::new(0xFF, 0xFA, 0xCD)),
    ("LightBlue", Rgb::new(0xAD, 0xD8, 0xE6)),
    ("LightCoral", Rgb::new(0xF0, 0x80, 0x80)),
    ("LightCyan", Rgb::new(0xE0, 0xFF, 0xFF)),
    ("LightGoldenrodYellow", Rgb::new(0xFA, 0xFA, 0xD2)),
    ("LightGray", Rgb::new(0xD3, 0xD3, 0xD3)),
    ("LightGreen", Rgb::new(0x90, 0xEE, 0x90)),
    ("LightPink", Rgb::new(0xFF, 0xB6, 0xC1)),
    ("LightSalmon", Rgb::new(0xFF, 0xA0, 0x7A)),
    ("LightSeaGreen", Rgb::new(0x20, 0xB2, 0xAA)),
    ("LightSkyBlue", Rgb::new(0x87, 0xCE, 0xFA)),
    ("LightSlateGray", Rgb::new(0x77, 0x88, 0x99)),
    ("LightSteelBlue", Rgb::new(0xB0, 0xC4, 0xDE)),
    ("LightYellow", Rgb::new(0xFF, 0xFF, 0xE0)),
    ("Lime", Rgb::new(0x00, 0xFF, 0x00)),
    ("LimeGreen", Rgb::new(0x32, 0xCD, 0x32)),
    ("Linen", Rgb::new(0xFA, 0xF0, 0xE6)),
    ("Magenta", Rgb::new(0xFF, 0x00, 0xFF)),
    ("Maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("MediumAquamarine", Rgb::new(0x66, 0xCD, 0xAA)),
    ("MediumBlue", Rgb::new(0x00, 0x00, 0xCD)),
    ("MediumOrchid", Rgb::new(0xBA, 0x55, 0xD3)),
    ("MediumPurple", Rgb::new(0x93, 0x70, 0xDB)),
    ("MediumSeaGreen", Rgb::new(0x3C, 0xB3, 0x71)),
    ("MediumSlateBlue", Rgb::new(0x7B, 0x68, 0xEE)),
    ("MediumSpringGreen", Rgb::new(0x00, 0xFA, 0x9A)),
    ("MediumTurquoise", Rgb::new(0x48, 0xD1, 0xCC)),
    ("MediumVioletRed", Rgb::new(0xC7, 0x15, 0x85)),
    ("MidnightBlue", Rgb::new(0x19, 0x19, 0x70)),
    ("MintCream", Rgb::new(0xF5, 0xFF, 0xFA)),
    ("MistyRose", Rgb::new(0xFF, 0xE4, 0xE1)),
    ("Moccasin", Rgb::new(0xFF, 0xE4, 0xB5)),
    ("NavajoWhite", Rgb::new(0xFF, 0xDE, 0xAD)),
    ("Navy", Rgb::new(0x00, 0x00, 0x80)),
    ("OldLace", Rgb::new(0xFD, 0xF5, 0xE6)),
    ("Olive", Rgb::new(0x80, 0x80, 0x00)),
    ("OliveDrab", Rgb::new(0x6B, 0x8E, 0x23)),
    ("Orange", Rgb::new(0xFF, 0xA5, 0x00)),
    ("OrangeRed", Rgb::new(0xFF, 0x45, 0x00)),
    ("Orchid", Rgb::new(0xDA, 0x70, 0xD6)),
    ("PaleGoldenrod", Rgb::new(0xEE, 0xE8, 0xAA)),
    ("PaleGreen", Rgb::new(0x98, 0xFB, 0x98)),
    ("PaleTurquoise", Rgb::new(0xAF, 0xEE, 0xEE)),
    ("PaleVioletRed", Rgb::new(0xDB, 0x70, 0x93)),
    ("PapayaWhip", Rgb::new(0xFF, 0xEF, 0xD5)),
    ("PeachPuff", Rgb::new(0xFF, 0xDA, 0xB9)),
    ("Peru", Rgb::new(0xCD, 0x85, 0x3F)),
    ("Pink", Rgb::new(0xFF, 0xC0, 0xCB)),
    ("Plum", Rgb::new(0xDD, 0xA0, 0xDD)),
    ("PowderBlue", Rgb::new(0xB0, 0xE0, 0xE6)),
    ("Purple", Rgb::new(0x80, 0x00, 0x80)),
    ("RebeccaPurple", Rgb::new(0x66, 0x33, 0x99)),
    ("Red", Rgb::new(0xFF, 0x00, 0x00)),
    ("RosyBrown", Rgb::new(0xBC, 0x8F, 0x8F)),
    ("RoyalBlue", Rgb::new(0x41, 0x69, 0xE1)),
    ("SaddleBrown", Rgb::new(0x8B, 0x45, 0x13)),
    ("Salmon", Rgb::new(0xFA, 0x80, 0x72)),
    ("SandyBrown", Rgb::new(0xF4, 0xA4, 0x60)),
    ("SeaGreen", Rgb::new(0x2E, 0x8B, 0x57)),
    ("SeaShell", Rgb::new(0xFF, 0xF5, 0xEE)),
    ("Sienna", Rgb::new(0xA0, 0x52, 0x2D)),
    ("Silver", Rgb::new(0xC0, 0xC0, 0xC0)),
    ("SkyBlue", Rgb::new(0x87, 0xCE, 0xEB)),
    ("SlateBlue", Rgb::new(0x6A, 0x5A, 0xCD)),
    ("SlateGray", Rgb::new(0x70, 0x80, 0x90)),
    ("Snow", Rgb::new(0xFF, 0xFA, 0xFA)),
    ("SpringGreen", Rgb::new(0x00, 0xFF, 0x7F)),
    ("SteelBlue", Rgb::new(0x46, 0x82, 0xB4)),
    ("Tan", Rgb::new(0xD2, 0xB4, 0x8C)),
    ("Teal", Rgb::new(0x00, 0x80, 0x80)),
    ("Thistle", Rgb::new(0xD8, 0xBF, 0xD8)),
    ("Tomato", Rgb::new(0xFF, 0x63, 0x47)),
    ("Turquoise", Rgb::new(0x40, 0xE0, 0xD0)),
    ("Violet", Rgb::new(0xEE, 0x82, 0xEE)),
    ("Wheat", Rgb::new(0xF5, 0xDE, 0xB3)),
    ("White", Rgb::new(0xFF, 0xFF, 0xFF)),
    ("WhiteSmoke", Rgb::new(0xF5, 0xF5, 0xF5)),
    ("Yellow", Rgb::new(0xFF, 0xFF, 0x00)),
    ("YellowGreen", Rgb::new(0x9A, 0xCD, 0x32)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup_is_case_insensitive() {
        assert_eq!(Rgb::from_name("Orange"), Rgb::new(0xFF, 0xA5, 0x00));
        assert_eq!(Rgb::from_name("magenta"), Rgb::new(0xFF, 0x00, 0xFF));
        assert_eq!(Rgb::from_name(" CYAN "), Rgb::new(0x00, 0xFF, 0xFF));
    }

    #[test]
    fn test_full_web_colour_table() {
        assert_eq!(NAMED_COLORS.len(), 141);
        assert!(NAMED_COLORS
            .windows(2)
            .all(|pair| pair[0].0.to_ascii_lowercase() < pair[1].0.to_ascii_lowercase()));

        assert_eq!(Rgb::from_name("DarkOrange").display_argb(), 29_696);
        assert_eq!(Rgb::from_name("Brown").display_argb(), 5_952_982);
        assert_eq!(Rgb::from_name("Indigo").display_argb(), 11_861_886);
        assert_eq!(Rgb::from_name("LightBlue").display_argb(), 5_383_962);
        assert_eq!(Rgb::from_name("crimson").display_argb(), 2_354_116);
        assert_eq!(Rgb::from_name("AliceBlue"), Rgb::new(0xF0, 0xF8, 0xFF));
        assert_eq!(Rgb::from_name("YellowGreen"), Rgb::new(0x9A, 0xCD, 0x32));
    }

    #[test]
    fn test_unknown_name_packs_to_zero() {
        let rgb = Rgb::from_name("NotAColour");
        assert_eq!(rgb, Rgb::EMPTY);
        assert_eq!(rgb.to_argb(), 0);
        assert_eq!(rgb.display_argb(), 0);
        assert_eq!(rgb.to_string(), "Empty");
    }

    #[test]
    fn test_argb_packing() {
        // Opaque yellow is 0xFFFFFF00, which is negative as i32
        let yellow = Rgb::from_name("Yellow");
        assert_eq!(yellow.to_argb(), 0xFFFF_FF00u32 as i32);
        assert_eq!(yellow.display_argb(), 256);

        let black = Rgb::new(0, 0, 0);
        assert_eq!(black.to_argb(), 0xFF00_0000u32 as i32);
        assert_eq!(black.display_argb(), 16_777_216);
        assert_eq!(Rgb::from_name("Orange").to_string(), "#FFA500");
    }

    #[test]
    fn test_hue_presets() {
        assert_eq!(HsvHue::Orange.value(), 32);
        assert_eq!(HsvHue::Blue.value(), 160);
        assert_eq!(HsvHue::Pink.value(), 224);
    }
}
