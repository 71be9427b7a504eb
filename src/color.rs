use std::ops::{Add, Mul};

/// 归一化 RGBA 颜色，各通道名义范围 [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const PURPLE: Color = Color::rgb(1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// 打包为 ARGB8888（0xAARRGGBB）。
    /// clear、像素写入、混合回读和纹理存储都使用这一种字节序。
    pub fn to_argb(self) -> u32 {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        to_byte(self.a) << 24 | to_byte(self.r) << 16 | to_byte(self.g) << 8 | to_byte(self.b)
    }

    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, s: f32) -> Color {
        Color::new(self.r * s, self.g * s, self.b * s, self.a * s)
    }
}

// 逐通道相乘，用于顶点色调制纹理色
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_byte_order() {
        assert_eq!(Color::RED.to_argb(), 0xFFFF0000);
        assert_eq!(Color::GREEN.to_argb(), 0xFF00FF00);
        assert_eq!(Color::BLUE.to_argb(), 0xFF0000FF);
        assert_eq!(Color::new(0.0, 0.0, 0.0, 0.0).to_argb(), 0x00000000);
    }

    #[test]
    fn pack_round_trips_8bit_values() {
        // 每个 8-bit 可表示的通道值都必须精确往返
        for k in 0u32..=255 {
            let c = Color::new(
                k as f32 / 255.0,
                (255 - k) as f32 / 255.0,
                k as f32 / 255.0,
                k as f32 / 255.0,
            );
            assert_eq!(Color::from_argb(c.to_argb()), c, "k = {k}");
        }
    }

    #[test]
    fn pack_clamps_out_of_range() {
        assert_eq!(Color::new(2.0, -1.0, 0.0, 1.0).to_argb(), 0xFFFF0000);
    }
}
