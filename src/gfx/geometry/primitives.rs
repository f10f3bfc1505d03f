//! Primitive shape generation
//!
//! Z-axis aligned shapes centered at the origin, generated in indexed form
//! with outward normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a cone with its base cap.
///
/// # Arguments
/// * `radius` - Radius of the base circle
/// * `height` - Height of the cone (along the Z-axis)
/// * `segments` - Number of circular segments
///
/// The base sits at -height/2, the apex at +height/2.
pub fn generate_cone(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Side surface normal leans outward by the slope of the cone.
    let slant = (height * height + radius * radius).sqrt();
    let (nxy, nz) = (height / slant, radius / slant);

    // Base ring and apex vertices, interleaved per segment
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        // Base ring vertex
        data.vertices
            .push([radius * cos_a, radius * sin_a, -half_height]);
        data.normals.push([cos_a * nxy, sin_a * nxy, nz]);

        // Apex vertex (duplicated per segment so the normal can vary)
        data.vertices.push([0.0, 0.0, half_height]);
        data.normals.push([cos_a * nxy, sin_a * nxy, nz]);
    }

    // Side faces
    for i in 0..segs {
        let ring_current = i * 2;
        let apex_current = ring_current + 1;
        let ring_next = (i + 1) * 2;

        data.indices.push(ring_current);
        data.indices.push(ring_next);
        data.indices.push(apex_current);
    }

    // Base cap
    let center_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, 0.0, -half_height]);
    data.normals.push([0.0, 0.0, -1.0]);

    let cap_start = data.vertices.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        data.vertices
            .push([radius * angle.cos(), radius * angle.sin(), -half_height]);
        data.normals.push([0.0, 0.0, -1.0]);
    }

    for i in 0..segs {
        data.indices.push(center_idx);
        data.indices.push(cap_start + i + 1);
        data.indices.push(cap_start + i);
    }

    data
}

/// Generate a capsule: a cylinder with hemispherical end caps.
///
/// # Arguments
/// * `radius` - Radius of the cylinder and both caps
/// * `cylinder_height` - Height of the cylindrical section (along the Z-axis)
/// * `segments` - Number of circular segments
/// * `rings` - Number of latitude rows per hemisphere
///
/// The cylindrical section spans -cylinder_height/2 to +cylinder_height/2;
/// the caps extend `radius` beyond each end.
pub fn generate_capsule(
    radius: f32,
    cylinder_height: f32,
    segments: u32,
    rings: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let rings = rings.max(1);
    let half_height = cylinder_height * 0.5;

    // Cylinder side, bottom and top vertices interleaved per segment
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let x = radius * cos_a;
        let y = radius * sin_a;

        data.vertices.push([x, y, -half_height]);
        data.normals.push([cos_a, sin_a, 0.0]);

        data.vertices.push([x, y, half_height]);
        data.normals.push([cos_a, sin_a, 0.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(top_current);
        data.indices.push(bottom_next);

        data.indices.push(top_current);
        data.indices.push(top_next);
        data.indices.push(bottom_next);
    }

    // Hemispherical caps, poles outward
    add_hemisphere(&mut data, radius, half_height, segs, rings, 1.0);
    add_hemisphere(&mut data, radius, -half_height, segs, rings, -1.0);

    data
}

/// Latitude/longitude hemisphere grid attached at `z_offset`.
///
/// `direction` is +1.0 for the top cap, -1.0 for the bottom cap.
fn add_hemisphere(
    data: &mut GeometryData,
    radius: f32,
    z_offset: f32,
    segments: u32,
    rings: u32,
    direction: f32,
) {
    let base = data.vertices.len() as u32;

    for lat in 0..=rings {
        let theta = lat as f32 * (PI / 2.0) / rings as f32; // pole to equator
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=segments {
            let phi = long as f32 * 2.0 * PI / segments as f32;
            let nx = sin_theta * phi.cos();
            let ny = sin_theta * phi.sin();
            let nz = cos_theta * direction;

            data.vertices
                .push([radius * nx, radius * ny, z_offset + radius * nz]);
            data.normals.push([nx, ny, nz]);
        }
    }

    for lat in 0..rings {
        for long in 0..segments {
            let first = base + lat * (segments + 1) + long;
            let second = first + segments + 1;

            // Winding flips with the cap direction to stay outward-facing.
            if direction > 0.0 {
                data.indices.push(first);
                data.indices.push(second);
                data.indices.push(first + 1);

                data.indices.push(second);
                data.indices.push(second + 1);
                data.indices.push(first + 1);
            } else {
                data.indices.push(first);
                data.indices.push(first + 1);
                data.indices.push(second);

                data.indices.push(second);
                data.indices.push(first + 1);
                data.indices.push(second + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cone_generation() {
        let cone = generate_cone(30.25, 70.5, 16);
        // Side: 16 triangles, base cap: 16 triangles
        assert_eq!(cone.triangle_count(), 32);
        assert_eq!(cone.vertices.len(), cone.normals.len());

        // All indices in range
        assert!(cone
            .indices
            .iter()
            .all(|&i| (i as usize) < cone.vertex_count()));
    }

    #[test]
    fn test_cone_side_normals_point_outward() {
        let cone = generate_cone(1.0, 2.0, 8);
        // First vertex is on the base ring at angle 0; its normal leans +X/+Z.
        let normal = cone.normals[0];
        assert!(normal[0] > 0.0);
        assert!(normal[2] > 0.0);
        let length =
            (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
        assert!((length - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn test_capsule_generation() {
        let capsule = generate_capsule(25.25, 40.5, 12, 4);
        // Cylinder: 2 * 12 triangles, caps: 2 * (4 * 12 * 2) triangles
        assert_eq!(capsule.triangle_count(), 24 + 192);
        assert_eq!(capsule.vertices.len(), capsule.normals.len());
        assert!(capsule
            .indices
            .iter()
            .all(|&i| (i as usize) < capsule.vertex_count()));
    }

    #[test]
    fn test_capsule_spans_full_height() {
        let capsule = generate_capsule(2.0, 10.0, 8, 3);
        let max_z = capsule
            .vertices
            .iter()
            .map(|v| v[2])
            .fold(f32::MIN, f32::max);
        let min_z = capsule
            .vertices
            .iter()
            .map(|v| v[2])
            .fold(f32::MAX, f32::min);
        assert!((max_z - 7.0).abs() < 1.0e-4);
        assert!((min_z + 7.0).abs() < 1.0e-4);
    }

    #[test]
    fn test_expansion_keeps_analytic_normals() {
        let cone = generate_cone(1.0, 2.0, 6);
        let data = cone.to_mesh_data([0.8, 0.5, 0.2]);

        assert!(data.is_consistent());
        assert_eq!(data.triangle_count(), cone.triangle_count());
        assert!(data.colors.iter().all(|c| *c == [0.8, 0.5, 0.2]));

        // First expanded vertex carries the analytic normal of index 0.
        let first_index = cone.indices[0] as usize;
        assert_eq!(data.normals[0], cone.normals[first_index]);
    }
}
