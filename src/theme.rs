#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn parse(color: &str) -> Option<Self> {
        let hex = color.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let num = u32::from_str_radix(hex, 16).ok()?;
        Some(Rgb {
            r: (num >> 16) as u8,
            g: ((num >> 8) & 0xFF) as u8,
            b: (num & 0xFF) as u8,
        })
    }

    /// Shift every channel up by `percent` of full scale, clamped at white.
    pub fn lighten(self, percent: u8) -> Self {
        let amount = (2.55 * percent as f64).round() as u16;
        let shift = |c: u8| (c as u16 + amount).min(255) as u8;
        Rgb {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Two-stop gradient drawn behind a ticket: its own color and a lighter tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub from: Rgb,
    pub to: Rgb,
}

const NEUTRAL: Rgb = Rgb {
    r: 0xE8,
    g: 0xF0,
    b: 0xF8,
};

impl Gradient {
    pub fn for_color(color: &str) -> Self {
        let from = Rgb::parse(color).unwrap_or(NEUTRAL);
        Gradient {
            from,
            to: from.lighten(20),
        }
    }

    /// Color at `position` in `[0, 1]` along the gradient.
    pub fn at(&self, position: f64) -> Rgb {
        let p = position.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * p).round() as u8;
        Rgb {
            r: mix(self.from.r, self.to.r),
            g: mix(self.from.g, self.to.g),
            b: mix(self.from.b, self.to.b),
        }
    }
}
