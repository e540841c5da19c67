//! Colors and surface materials for scene nodes.

/// Linear RGB color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Builds a color from hue, saturation and lightness, all in `0.0..=1.0`.
    ///
    /// Hue wraps around, so `1.25` is the same as `0.25`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgb(l, l, l);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Self {
            r: hue_to_rgb(q, p, h + 1.0 / 3.0),
            g: hue_to_rgb(q, p, h),
            b: hue_to_rgb(q, p, h - 1.0 / 3.0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::rgb(self.r * factor, self.g * factor, self.b * factor)
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// How a material reacts to the scene lights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Flat color, lights are ignored
    Unlit,
    /// Diffuse plus specular highlights
    Phong,
}

/// Surface appearance of a scene node
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub opacity: f32,
    pub shininess: f32,
    pub shading: Shading,
    /// Draw triangle edges instead of filled triangles
    pub wireframe: bool,
}

impl Material {
    /// Unlit material with a flat color
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            emissive: Color::BLACK,
            opacity: 1.0,
            shininess: 0.0,
            shading: Shading::Unlit,
            wireframe: false,
        }
    }

    /// Lit material, default shininess of 30
    pub fn phong(color: Color) -> Self {
        Self {
            color,
            emissive: Color::BLACK,
            opacity: 1.0,
            shininess: 30.0,
            shading: Shading::Phong,
            wireframe: false,
        }
    }

    pub fn with_emissive(mut self, emissive: Color) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-3 && (a.g - b.g).abs() < 1e-3 && (a.b - b.b).abs() < 1e-3
    }

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0x00ff88);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, 1.0);
        assert!((c.b - 136.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_hsl() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
        assert!(close(Color::from_hsl(1.0 / 3.0, 1.0, 0.5), Color::rgb(0.0, 1.0, 0.0)));
        assert!(close(Color::from_hsl(2.0 / 3.0, 1.0, 0.5), Color::rgb(0.0, 0.0, 1.0)));
        assert!(close(Color::from_hsl(0.3, 0.0, 0.4), Color::rgb(0.4, 0.4, 0.4)));
        assert!(close(Color::from_hsl(1.25, 0.9, 0.6), Color::from_hsl(0.25, 0.9, 0.6)));
    }

    #[test]
    fn test_material_builders() {
        let m = Material::basic(Color::WHITE).with_opacity(0.7);
        assert!(m.is_transparent());
        assert_eq!(m.shading, Shading::Unlit);

        let m = Material::phong(Color::WHITE).with_opacity(2.0);
        assert!(!m.is_transparent());
    }
}
