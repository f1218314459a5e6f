//! The product model as plain geometry.
//!
//! The renderer only consumes `(vertices, indices)` per named part; where
//! they come from is an asset concern. The built-in product is generated
//! here from primitive solids so both frontends can run without touching
//! the filesystem. Parts are addressable by name, the way a loaded scene
//! graph would expose its geometry nodes.

use fnv::FnvHashMap;
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// One named piece of the product.
pub struct MeshPart {
    pub name: String,
    pub vertices: Vec<Vertex>,
    /// Triangle list.
    pub indices: Vec<u32>,
    /// Unique undirected edges of the triangle list, as a line list.
    pub edges: Vec<u32>,
}

impl MeshPart {
    fn new(name: &str, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let edges = edge_list(&indices);
        Self {
            name: name.to_owned(),
            vertices,
            indices,
            edges,
        }
    }
}

/// The whole product: an ordered part list plus a name index.
pub struct ProductMesh {
    parts: Vec<MeshPart>,
    by_name: FnvHashMap<String, usize>,
}

impl ProductMesh {
    pub fn new(parts: Vec<MeshPart>) -> Self {
        let by_name = parts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
        Self { parts, by_name }
    }

    #[inline]
    pub fn parts(&self) -> &[MeshPart] {
        &self.parts
    }

    /// Look up a geometry node by name.
    pub fn part(&self, name: &str) -> Option<&MeshPart> {
        self.by_name.get(name).map(|&i| &self.parts[i])
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Reduce the mesh to one named part, for isolated inspection.
    pub fn retain_part(&mut self, name: &str) -> bool {
        if !self.by_name.contains_key(name) {
            return false;
        }
        self.parts.retain(|p| p.name == name);
        self.by_name.retain(|n, _| n == name);
        if let Some(slot) = self.by_name.get_mut(name) {
            *slot = 0;
        }
        true
    }
}

/// Build the built-in wristwatch model, centered on the origin with the
/// dial facing +Z.
pub fn product_watch() -> ProductMesh {
    let case = cylinder(1.1, 0.22, 48);
    let bezel = transformed(
        torus(1.1, 0.1, 48, 16),
        Mat4::from_translation(Vec3::new(0.0, 0.0, 0.22)),
    );
    let crown = transformed(
        cylinder(0.12, 0.16, 20),
        Mat4::from_translation(Vec3::new(1.28, 0.0, 0.0))
            * Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2),
    );
    let strap_upper = transformed(
        cuboid(Vec3::new(0.45, 0.55, 0.08)),
        Mat4::from_translation(Vec3::new(0.0, 1.75, 0.0)),
    );
    let strap_lower = transformed(
        cuboid(Vec3::new(0.45, 0.55, 0.08)),
        Mat4::from_translation(Vec3::new(0.0, -1.75, 0.0)),
    );

    ProductMesh::new(vec![
        MeshPart::new("case", case.0, case.1),
        MeshPart::new("bezel", bezel.0, bezel.1),
        MeshPart::new("crown", crown.0, crown.1),
        MeshPart::new("strap_upper", strap_upper.0, strap_upper.1),
        MeshPart::new("strap_lower", strap_lower.0, strap_lower.1),
    ])
}

type Geometry = (Vec<Vertex>, Vec<u32>);

fn transformed(geometry: Geometry, transform: Mat4) -> Geometry {
    let (mut vertices, indices) = geometry;
    let normal_m = glam::Mat3::from_mat4(transform);
    for v in &mut vertices {
        let p = transform.transform_point3(Vec3::from(v.position));
        let n = (normal_m * Vec3::from(v.normal)).normalize_or_zero();
        v.position = p.to_array();
        v.normal = n.to_array();
    }
    (vertices, indices)
}

/// Closed cylinder around the Z axis: side wall plus both caps, with
/// separate vertices per surface so normals stay hard at the rims.
fn cylinder(radius: f32, half_height: f32, segments: u32) -> Geometry {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let seg = segments.max(3);

    // side wall
    for i in 0..=seg {
        let a = i as f32 / seg as f32 * std::f32::consts::TAU;
        let (sin, cos) = a.sin_cos();
        let n = [cos, sin, 0.0];
        vertices.push(Vertex {
            position: [radius * cos, radius * sin, -half_height],
            normal: n,
        });
        vertices.push(Vertex {
            position: [radius * cos, radius * sin, half_height],
            normal: n,
        });
    }
    for i in 0..seg {
        let base = i * 2;
        indices.extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
    }

    // caps
    for &(z, nz) in &[(half_height, 1.0_f32), (-half_height, -1.0_f32)] {
        let center = vertices.len() as u32;
        vertices.push(Vertex {
            position: [0.0, 0.0, z],
            normal: [0.0, 0.0, nz],
        });
        for i in 0..=seg {
            let a = i as f32 / seg as f32 * std::f32::consts::TAU;
            let (sin, cos) = a.sin_cos();
            vertices.push(Vertex {
                position: [radius * cos, radius * sin, z],
                normal: [0.0, 0.0, nz],
            });
        }
        for i in 0..seg {
            let rim = center + 1 + i;
            if nz > 0.0 {
                indices.extend_from_slice(&[center, rim, rim + 1]);
            } else {
                indices.extend_from_slice(&[center, rim + 1, rim]);
            }
        }
    }

    (vertices, indices)
}

/// Torus around the Z axis with the given major and tube radii.
fn torus(major: f32, minor: f32, seg_major: u32, seg_minor: u32) -> Geometry {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let sm = seg_major.max(3);
    let sn = seg_minor.max(3);

    for i in 0..=sm {
        let u = i as f32 / sm as f32 * std::f32::consts::TAU;
        let (su, cu) = u.sin_cos();
        for j in 0..=sn {
            let v = j as f32 / sn as f32 * std::f32::consts::TAU;
            let (sv, cv) = v.sin_cos();
            let ring = major + minor * cv;
            vertices.push(Vertex {
                position: [ring * cu, ring * su, minor * sv],
                normal: [cv * cu, cv * su, sv],
            });
        }
    }
    let stride = sn + 1;
    for i in 0..sm {
        for j in 0..sn {
            let a = i * stride + j;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    (vertices, indices)
}

/// Axis-aligned box with the given half extents, hard normals per face.
fn cuboid(half: Vec3) -> Geometry {
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for (n, u, v) in faces {
        let n = Vec3::from(n);
        let u = Vec3::from(u);
        let v = Vec3::from(v);
        let base = vertices.len() as u32;
        for (du, dv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * du + v * dv) * half;
            vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// Unique undirected edges of a triangle list, flattened for a line-list
/// draw. Shared edges appear once.
fn edge_list(indices: &[u32]) -> Vec<u32> {
    let mut pairs: Vec<(u32, u32)> = Vec::with_capacity(indices.len());
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            pairs.push((a.min(b), a.max(b)));
        }
    }
    pairs.sort_unstable();
    pairs.dedup();
    let mut edges = Vec::with_capacity(pairs.len() * 2);
    for (a, b) in pairs {
        edges.push(a);
        edges.push(b);
    }
    edges
}
