//! This module builds simple flat-shaded solids: the extruded star and the cone frusta used for
//! the core and the base of the tree.

use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// A flat-shaded triangle soup. Every three consecutive positions make one triangle, wound
/// counter-clockwise when seen from the outside, and each vertex carries its face normal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    /// The vertex positions.
    pub positions: Vec<Vec3>,

    /// The vertex normals, one per position.
    pub normals: Vec<Vec3>,
}

impl TriangleMesh {
    /// Add a triangle. Triangles with no area are skipped, which happens at the apex of a cone.
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let cross = (b - a).cross(c - a);
        if cross.length_squared() < 1e-12 {
            return;
        }

        let normal = cross.normalize();
        self.positions.extend([a, b, c]);
        self.normals.extend([normal; 3]);
    }

    /// The number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Iterate over the triangles of the mesh, along with their normals.
    pub fn triangles(&self) -> impl Iterator<Item = ([Vec3; 3], Vec3)> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.normals.iter().step_by(3))
            .map(|(tri, &normal)| ([tri[0], tri[1], tri[2]], normal))
    }

    /// The positions as plain arrays, for handing to a renderer.
    pub fn position_arrays(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }

    /// The normals as plain arrays, for handing to a renderer.
    pub fn normal_arrays(&self) -> Vec<[f32; 3]> {
        self.normals.iter().map(|n| n.to_array()).collect()
    }
}

/// How to extrude an outline into a solid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtrudeSettings {
    /// The depth of the straight sides.
    pub depth: f32,

    /// How far the bevel extends in front of and behind the straight sides.
    pub bevel_thickness: f32,

    /// How far out from the outline the bevel extends.
    pub bevel_size: f32,

    /// The number of rings used to round off each bevel. Zero means no bevel.
    pub bevel_segments: u32,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            depth: 0.4,
            bevel_thickness: 0.1,
            bevel_size: 0.05,
            bevel_segments: 4,
        }
    }
}

/// Extrude a closed outline along the z axis into a closed solid centred on `z = 0`.
///
/// The outline must be star-shaped around the origin (every point visible from the origin),
/// which is what lets the caps be triangle fans and the bevel push points straight out from
/// the origin.
pub fn extrude_outline(outline: &[Vec2], settings: &ExtrudeSettings) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    if outline.len() < 3 {
        return mesh;
    }

    // The winding below assumes a clockwise outline
    let mut outline = outline.to_vec();
    if signed_area(&outline) > 0. {
        outline.reverse();
    }

    let half_depth = settings.depth / 2.;

    // Each ring is a (z, outward offset) pair, going from the front cap to the back cap
    let rings: Vec<(f32, f32)> = if settings.bevel_segments == 0 {
        vec![(half_depth, 0.), (-half_depth, 0.)]
    } else {
        let bevel_ring = |s: u32| {
            let t = s as f32 / settings.bevel_segments as f32 * FRAC_PI_2;
            (
                half_depth + settings.bevel_thickness * t.cos(),
                settings.bevel_size * t.sin(),
            )
        };

        let front = (0..=settings.bevel_segments).map(bevel_ring);
        let back = (0..=settings.bevel_segments)
            .rev()
            .map(bevel_ring)
            .map(|(z, offset)| (-z, offset));
        front.chain(back).collect()
    };

    let ring_points: Vec<Vec<Vec3>> = rings
        .iter()
        .map(|&(z, offset)| {
            outline
                .iter()
                .map(|&p| (p + p.normalize_or_zero() * offset).extend(z))
                .collect()
        })
        .collect();

    let n = outline.len();

    for pair in ring_points.windows(2) {
        let (front, back) = (&pair[0], &pair[1]);
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.push_triangle(front[i], back[j], back[i]);
            mesh.push_triangle(front[i], front[j], back[j]);
        }
    }

    if let (Some(front), Some(back)) = (ring_points.first(), ring_points.last()) {
        let front_centre = Vec3::new(0., 0., front[0].z);
        let back_centre = Vec3::new(0., 0., back[0].z);

        for i in 0..n {
            let j = (i + 1) % n;
            mesh.push_triangle(front_centre, front[j], front[i]);
            mesh.push_triangle(back_centre, back[i], back[j]);
        }
    }

    mesh
}

/// Twice the signed area of the polygon, positive if it's counter-clockwise.
fn signed_area(outline: &[Vec2]) -> f32 {
    outline
        .iter()
        .zip(outline.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum()
}

/// Build a closed cone frustum around the y axis, centred on the origin, with the given radii
/// at the bottom and the top. A top radius of zero makes a cone.
pub fn frustum(bottom_radius: f32, top_radius: f32, height: f32, segments: u32) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    if segments < 3 {
        return mesh;
    }

    let half_height = height / 2.;
    let ring = |radius: f32, y: f32| -> Vec<Vec3> {
        (0..segments)
            .map(|k| {
                let angle = k as f32 / segments as f32 * TAU;
                Vec3::new(radius * angle.cos(), y, radius * angle.sin())
            })
            .collect()
    };

    let bottom = ring(bottom_radius, -half_height);
    let top = ring(top_radius, half_height);
    let bottom_centre = Vec3::new(0., -half_height, 0.);
    let top_centre = Vec3::new(0., half_height, 0.);

    let n = segments as usize;
    for k in 0..n {
        let l = (k + 1) % n;

        mesh.push_triangle(bottom[k], top[k], top[l]);
        mesh.push_triangle(bottom[k], top[l], bottom[l]);

        mesh.push_triangle(top_centre, top[l], top[k]);
        mesh.push_triangle(bottom_centre, bottom[k], bottom[l]);
    }

    mesh
}
