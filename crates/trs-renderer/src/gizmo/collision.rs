//! Gizmo collision detection utilities
//!
//! Ray-casting against the simplified collision shapes of the gizmo handles.
//! Rays do not need to be normalized: every function returns the parameter
//! `t` of the hit point `ray_origin + t * ray_dir`, which keeps `t`
//! comparable after the ray has been moved into a handle's local space.

use glam::Vec3;

/// Ray-cylinder intersection test.
///
/// Tests if a ray intersects with a finite cylinder defined by its axis
/// endpoints and radius.
///
/// # Algorithm
///
/// 1. **Infinite cylinder intersection**: Projects the ray and cylinder axis
///    into the plane perpendicular to the cylinder axis, then solves the
///    resulting 2D quadratic equation.
///
/// 2. **Finite bounds check**: Verifies that the intersection point lies
///    between `cylinder_start` and `cylinder_end`.
///
/// # Returns
///
/// * `Some(t)` - The ray parameter at the closest intersection point in front of the origin.
/// * `None` - If the ray does not intersect the cylinder, or runs parallel to its axis.
pub fn ray_cylinder_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    cylinder_start: Vec3,
    cylinder_end: Vec3,
    radius: f32,
) -> Option<f32> {
    let cylinder_length = (cylinder_end - cylinder_start).length();
    if cylinder_length <= f32::EPSILON {
        return None;
    }
    let cylinder_axis = (cylinder_end - cylinder_start) / cylinder_length;

    // Project ray direction and origin offset onto the plane perpendicular to the axis
    let d = ray_dir - cylinder_axis * ray_dir.dot(cylinder_axis);
    let o = (ray_origin - cylinder_start)
        - cylinder_axis * (ray_origin - cylinder_start).dot(cylinder_axis);

    // Quadratic coefficients: at² + bt + c = 0
    let a = d.dot(d);
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    // Entry point first; fall back to the exit point when the origin is inside
    for t in [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)] {
        if t < 0.0 {
            continue;
        }
        let hit_point = ray_origin + ray_dir * t;
        let projection = (hit_point - cylinder_start).dot(cylinder_axis);
        if (0.0..=cylinder_length).contains(&projection) {
            return Some(t);
        }
    }
    None
}

/// Ray-box intersection test (slab method) against an axis-aligned box.
///
/// # Returns
///
/// * `Some(t)` - Entry parameter, or the exit parameter when the origin is inside the box.
/// * `None` - If the ray misses the box or the box is entirely behind the origin.
pub fn ray_box_intersection(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for i in 0..3 {
        let origin = ray_origin[i];
        let dir = ray_dir[i];
        if dir.abs() < 1e-12 {
            // Parallel to this slab: must already be inside it
            if origin < min[i] || origin > max[i] {
                return None;
            }
            continue;
        }
        let t0 = (min[i] - origin) / dir;
        let t1 = (max[i] - origin) / dir;
        t_near = t_near.max(t0.min(t1));
        t_far = t_far.min(t0.max(t1));
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Ray-ring intersection test.
///
/// Tests if a ray crosses the annulus `|distance - ring_radius| <= thickness`
/// in the ring's plane.
///
/// # Returns
///
/// * `Some(t)` - The ray parameter at the intersection point.
/// * `None` - If the ray does not intersect the ring.
pub fn ray_ring_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    ring_center: Vec3,
    ring_normal: Vec3,
    ring_radius: f32,
    thickness: f32,
) -> Option<f32> {
    let denom = ray_dir.dot(ring_normal);

    // Ray is nearly parallel to the plane
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (ring_center - ray_origin).dot(ring_normal) / denom;
    if t < 0.0 {
        return None;
    }

    let hit_point = ray_origin + ray_dir * t;
    let distance_from_ring = ((hit_point - ring_center).length() - ring_radius).abs();

    if distance_from_ring <= thickness {
        Some(t)
    } else {
        None
    }
}

/// Ray-torus intersection test for a torus lying in the XZ plane around the origin.
///
/// The tube is approximated by `segments` straight cylinders, which also
/// catches rays that graze the ring edge-on, where [`ray_ring_intersection`]
/// alone would miss.
pub fn ray_torus_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    major_radius: f32,
    minor_radius: f32,
    segments: u32,
) -> Option<f32> {
    let segments = segments.max(3);
    let point = |i: u32| {
        let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
        Vec3::new(angle.cos() * major_radius, 0.0, angle.sin() * major_radius)
    };

    let mut closest: Option<f32> = ray_ring_intersection(
        ray_origin,
        ray_dir,
        Vec3::ZERO,
        Vec3::Y,
        major_radius,
        minor_radius,
    );
    for i in 0..segments {
        if let Some(t) =
            ray_cylinder_intersection(ray_origin, ray_dir, point(i), point(i + 1), minor_radius)
        {
            closest = Some(closest.map_or(t, |c| c.min(t)));
        }
    }
    closest
}
