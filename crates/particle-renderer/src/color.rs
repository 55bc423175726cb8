/// Straight-alpha sRGB color with components in [0, 1]
///
/// Canvas compositing happens in sRGB space, so no linear conversion is done.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Opaque color from 8-bit sRGB channels
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_srgba(r, g, b, 255)
    }

    #[inline]
    pub const fn from_srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// `#rrggbb` as an opaque color
    pub const fn from_hex(hex: u32) -> Self {
        Self::from_rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn from_catppuccin(color: &catppuccin::Color) -> Self {
        Self::from_rgb8(color.rgb.r, color.rgb.g, color.rgb.b)
    }

    /// with alpha builder method taking f32
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Component-wise interpolation, alpha included
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
    }
}

/// Scene colors
pub mod palette {
    use super::Color;

    pub mod flocking {
        use super::Color;

        pub const BACKGROUND: Color = Color::from_rgb8(2, 6, 23);
        pub const BOID: Color = Color::from_rgb8(100, 255, 218);
    }

    pub mod pairing {
        use super::Color;

        pub const BACKGROUND: Color = Color::from_hex(0x020611);
        pub const LINK: Color = Color::from_rgb8(91, 192, 190);
        pub const PAIRED: Color = Color::from_rgb8(200, 220, 230);
        pub const UNPAIRED: Color = Color::from_rgb8(100, 116, 139);
    }

    pub mod orbital {
        use super::Color;

        pub const BACKGROUND: Color = Color::from_hex(0x02040a);
        pub const CLOUD: Color = Color::from_rgb8(100, 149, 237);
        pub const ELECTRON: Color = Color::from_rgb8(0, 255, 255);
        pub const CORE: Color = Color::from_rgb8(255, 255, 255);
        pub const NUCLEUS: Color = Color::from_rgb8(200, 220, 255);
    }

    pub mod network {
        use super::Color;

        pub const GRADIENT: [(f32, Color); 3] = [
            (0.0, Color::from_hex(0x020c1b)),
            (0.6, Color::from_hex(0x0a192f)),
            (1.0, Color::from_hex(0x112240)),
        ];
        pub const LINK: Color = Color::from_rgb8(136, 146, 176);
        pub const NODE: Color = Color::from_rgb8(204, 214, 246);
    }

    /// Gravity uses the catppuccin mocha base, body colors come from the bodies
    pub fn gravity_background() -> Color {
        Color::from_catppuccin(&catppuccin::PALETTE.mocha.colors.crust)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_matches_channels() {
        assert_eq!(Color::from_hex(0x020611), Color::from_rgb8(2, 6, 17));
    }

    #[test]
    fn test_rgba8_round_trips_channels() {
        let color = Color::from_srgba(91, 192, 190, 38);
        assert_eq!(color.to_rgba8(), [91, 192, 190, 38]);
    }

    #[test]
    fn test_lerp_fades_alpha() {
        let start = palette::orbital::NUCLEUS.with_alpha(0.2);
        let end = palette::orbital::NUCLEUS.with_alpha(0.0);
        let mid = start.lerp(end, 0.5);
        assert!((mid.a - 0.1).abs() < 1e-6);
        assert_eq!(mid.r, start.r);
    }
}
