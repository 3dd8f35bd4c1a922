use std::fmt;

/// RGBA line color of a plotted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 255])
    }

    /// Parse `#rrggbb` (leading `#` optional). Alpha is always opaque.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }

    pub fn color32(&self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.0[0], self.0[1], self.0[2], self.0[3])
    }

    pub fn from_color32(c: egui::Color32) -> Self {
        let [r, g, b, a] = c.to_srgba_unmultiplied();
        Color([r, g, b, a])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Line colors handed out to value columns in the order they are added.
pub const COLOR_PALETTE: [Color; 8] = [
    Color::rgb(0x3b, 0x82, 0xf6), // Blue
    Color::rgb(0x10, 0xb9, 0x81), // Green
    Color::rgb(0xf5, 0x9e, 0x0b), // Amber
    Color::rgb(0x8b, 0x5c, 0xf6), // Violet
    Color::rgb(0xef, 0x44, 0x44), // Red
    Color::rgb(0xec, 0x48, 0x99), // Pink
    Color::rgb(0x06, 0xb6, 0xd4), // Cyan
    Color::rgb(0x84, 0xcc, 0x16), // Lime
];

pub fn color_for_index(index: usize) -> Color {
    COLOR_PALETTE[index % COLOR_PALETTE.len()]
}
