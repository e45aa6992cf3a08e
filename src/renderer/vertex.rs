//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// #f7f7f7 page background
    pub const BACKGROUND: [f32; 4] = [0.969, 0.969, 0.969, 1.0];
    /// #535353 ground, dino and cacti
    pub const INK: [f32; 4] = [0.325, 0.325, 0.325, 1.0];
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// #ff4081 phrase text
    pub const PHRASE: [f32; 4] = [1.0, 0.251, 0.506, 1.0];
}

/// HSL (degrees, 0-1, 0-1) to RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl_to_rgba(0.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsl_to_rgba(120.0, 1.0, 0.5, 1.0), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsl_to_rgba(240.0, 1.0, 0.5, 1.0), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(hsl_to_rgba(360.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_heart_pink() {
        // hsl(330, 100%, 70%) = #ff66b3
        let c = hsl_to_rgba(330.0, 1.0, 0.7, 1.0);
        assert!(close(c, [1.0, 0.4, 0.7, 1.0]));
    }
}
