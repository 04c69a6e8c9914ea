//! Mesh geometry
//!
//! [`Vertex`] is the interleaved layout every mesh is uploaded with. A
//! [`Mesh`] is the device-side result: a handle plus counts. Geometry stays
//! on the device; the CPU copy is dropped after upload.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::render::api::{GraphicsDevice, MeshHandle};
use crate::render::{RenderError, RenderResult};

/// Interleaved vertex layout
///
/// # Memory Layout
/// `#[repr(C)]` with only 4-byte fields and no padding: 36 bytes per vertex,
/// in attribute order position, color, tex_coord, normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// RGBA vertex colour
    pub color: [u8; 4],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
    /// Normal vector
    pub normal: [f32; 3],
}

// Only plain arrays of f32/u8 with no padding
unsafe impl bytemuck::Pod for Vertex {}
unsafe impl bytemuck::Zeroable for Vertex {}

impl Vertex {
    /// Create a white vertex
    pub const fn new(position: [f32; 3], tex_coord: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            color: [255; 4],
            tex_coord,
            normal,
        }
    }

    /// Size of one vertex in bytes
    #[allow(clippy::cast_possible_truncation)]
    pub const STRIDE: u32 = std::mem::size_of::<Self>() as u32;
}

/// Largest segment count accepted per axis by [`sphere_geometry`]
pub const MAX_SPHERE_SEGMENTS: u32 = 1024;

/// Build a UV sphere of radius one centred on the origin
///
/// `segments` is `[longitude, latitude]`, each in `1..=MAX_SPHERE_SEGMENTS`.
/// The result has `(longitude + 1) * (latitude + 1)` vertices (the seam is
/// duplicated so texture coordinates wrap cleanly) and
/// `6 * longitude * latitude` indices. Triangles wind counter-clockwise seen
/// from outside.
pub fn sphere_geometry(segments: [u32; 2]) -> RenderResult<(Vec<Vertex>, Vec<u32>)> {
    let [longitude, latitude] = segments;
    let invalid = || {
        RenderError::ResourceCreationFailed(format!(
            "sphere segments {longitude}x{latitude} outside 1..={MAX_SPHERE_SEGMENTS}"
        ))
    };
    if !(1..=MAX_SPHERE_SEGMENTS).contains(&longitude) || !(1..=MAX_SPHERE_SEGMENTS).contains(&latitude) {
        return Err(invalid());
    }
    let vertex_count = (longitude as usize + 1)
        .checked_mul(latitude as usize + 1)
        .ok_or_else(invalid)?;
    let index_count = (longitude as usize)
        .checked_mul(latitude as usize)
        .and_then(|quads| quads.checked_mul(6))
        .ok_or_else(invalid)?;

    let mut vertices = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(index_count);

    for j in 0..=latitude {
        let v = j as f32 / latitude as f32;
        let pitch = v * PI - FRAC_PI_2;
        for i in 0..=longitude {
            let u = i as f32 / longitude as f32;
            let yaw = u * 2.0 * PI;
            let normal = [pitch.cos() * yaw.cos(), pitch.sin(), -pitch.cos() * yaw.sin()];
            vertices.push(Vertex::new(normal, [u, v], normal));
        }
    }

    for j in 0..latitude {
        for i in 0..longitude {
            let bottom_left = j * (longitude + 1) + i;
            let bottom_right = bottom_left + 1;
            let top_left = bottom_left + longitude + 1;
            let top_right = top_left + 1;
            indices.extend_from_slice(&[bottom_left, bottom_right, top_right, top_right, top_left, bottom_left]);
        }
    }

    Ok((vertices, indices))
}

/// Geometry uploaded to a graphics device
#[derive(Debug)]
pub struct Mesh {
    handle: MeshHandle,
    vertex_count: usize,
    index_count: usize,
}

impl Mesh {
    /// Upload vertices and triangle indices
    ///
    /// Fails if the index list is not made of whole triangles or refers past
    /// the end of the vertex list.
    pub fn new(device: &mut dyn GraphicsDevice, vertices: &[Vertex], indices: &[u32]) -> RenderResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&out_of_range) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(RenderError::ResourceCreationFailed(format!(
                "index {out_of_range} out of range for {} vertices",
                vertices.len()
            )));
        }

        let handle = device.create_mesh(bytemuck::cast_slice(vertices), Vertex::STRIDE, indices)?;
        log::trace!("Uploaded mesh {:?}: {} vertices, {} indices", handle, vertices.len(), indices.len());
        Ok(Self {
            handle,
            vertex_count: vertices.len(),
            index_count: indices.len(),
        })
    }

    /// Upload a UV sphere; see [`sphere_geometry`]
    pub fn sphere(device: &mut dyn GraphicsDevice, segments: [u32; 2]) -> RenderResult<Self> {
        let (vertices, indices) = sphere_geometry(segments)?;
        Self::new(device, &vertices, &indices)
    }

    /// Device handle
    pub const fn handle(&self) -> MeshHandle {
        self.handle
    }

    /// Number of vertices uploaded
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of indices uploaded
    pub const fn index_count(&self) -> usize {
        self.index_count
    }

    /// Draw with whatever program and state are current
    pub fn draw(&self, device: &mut dyn GraphicsDevice) {
        device.draw_mesh(self.handle);
    }

    /// Release the device geometry
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_mesh(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_vertex_layout_is_packed() {
        assert_eq!(Vertex::STRIDE, 36);
        let vertices = [Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0], [0.0, 0.0, 1.0]); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 72);
    }

    #[test]
    fn test_sphere_counts() {
        let (vertices, indices) = sphere_geometry([16, 16]).unwrap();
        assert_eq!(vertices.len(), 17 * 17);
        assert_eq!(indices.len(), 6 * 16 * 16);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        let (vertices, _) = sphere_geometry([8, 6]).unwrap();
        for vertex in &vertices {
            let [x, y, z] = vertex.position;
            assert_relative_eq!((x * x + y * y + z * z).sqrt(), 1.0, epsilon = EPSILON);
        }
        assert_relative_eq!(vertices[0].position[1], -1.0, epsilon = EPSILON);
        assert_relative_eq!(vertices[vertices.len() - 1].position[1], 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_winds_outward() {
        let (vertices, indices) = sphere_geometry([16, 16]).unwrap();
        // First triangle of the equator band
        let start = 6 * 16 * 8;
        let [a, b, c] = [indices[start], indices[start + 1], indices[start + 2]].map(|i| {
            let p = vertices[i as usize].position;
            nalgebra::Vector3::new(p[0], p[1], p[2])
        });
        let normal = (b - a).cross(&(c - a));
        assert!(normal.dot(&a) > 0.0);
    }

    #[test]
    fn test_sphere_rejects_zero_segments() {
        assert!(matches!(sphere_geometry([0, 16]), Err(RenderError::ResourceCreationFailed(_))));
        assert!(matches!(sphere_geometry([16, 0]), Err(RenderError::ResourceCreationFailed(_))));
    }

    #[test]
    fn test_sphere_rejects_oversized_segments() {
        assert!(sphere_geometry([u32::MAX, 1]).is_err());
        assert!(sphere_geometry([1, MAX_SPHERE_SEGMENTS + 1]).is_err());
    }

    #[test]
    fn test_single_segment_sphere() {
        let (vertices, indices) = sphere_geometry([1, 1]).unwrap();
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
        assert!(vertices.iter().all(|vertex| vertex.position.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn test_invalid_sphere_creates_nothing() {
        let mut device = crate::render::backends::RecordingDevice::new();
        assert!(Mesh::sphere(&mut device, [0, 16]).is_err());
        assert!(device.calls().is_empty());
        assert_eq!(device.live_resource_count(), 0);
    }
}
