//! Ray / line / plane helpers used by the manipulation subtools

use glam::Vec3;

use crate::constants::GEOMETRY_EPSILON;

/// Closest points between two infinite lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoints {
    /// Point on the first line (`p0 -> p1`)
    pub p: Vec3,
    /// Point on the second line (`q0 -> q1`)
    pub q: Vec3,
}

/// Closest points between the line through `p0, p1` and the line through `q0, q1`.
///
/// Returns `None` when the lines are parallel (or either is degenerate).
///
/// ```text
/// u = p1 - p0, v = q1 - q0, w0 = p0 - q0
/// s = (b e - c d) / (a c - b²)
/// t = (a e - b d) / (a c - b²)
/// ```
pub fn closest_points(p0: Vec3, p1: Vec3, q0: Vec3, q1: Vec3) -> Option<ClosestPoints> {
    let u = p1 - p0;
    let v = q1 - q0;
    let w0 = p0 - q0;
    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w0);
    let e = v.dot(w0);
    let denom = a * c - b * b;
    if denom < GEOMETRY_EPSILON {
        return None;
    }

    let s = (b * e - c * d) / denom;
    let t = (a * e - b * d) / denom;
    Some(ClosestPoints {
        p: p0 + u * s,
        q: q0 + v * t,
    })
}

/// Closest point to `q` on the infinite line through `p0, p1`.
pub fn closest_point(p0: Vec3, p1: Vec3, q: Vec3) -> Option<Vec3> {
    let u = p1 - p0;
    let len_sq = u.dot(u);
    if len_sq < GEOMETRY_EPSILON {
        return None;
    }
    let t = u.dot(q - p0) / len_sq;
    Some(p0 + u * t)
}

/// Ray parameter where the ray `origin + t * direction` meets the plane.
///
/// `None` when the ray is parallel to the plane. Negative `t` is allowed;
/// callers decide whether hits behind the origin matter.
pub fn intersect_plane(
    plane_normal: Vec3,
    plane_point: Vec3,
    ray_origin: Vec3,
    ray_direction: Vec3,
) -> Option<f32> {
    let denom = plane_normal.dot(ray_direction);
    if denom.abs() < GEOMETRY_EPSILON {
        return None;
    }
    Some((plane_point - ray_origin).dot(plane_normal) / denom)
}

/// Orthogonal projection of `point` onto the plane through `plane_point`.
pub fn project_point_to_plane(plane_normal: Vec3, plane_point: Vec3, point: Vec3) -> Vec3 {
    let n = plane_normal.normalize_or_zero();
    point - n * (point - plane_point).dot(n)
}

/// Signed angle (radians) from `reference` to `direction` about `axis`.
///
/// Positive angles are counter-clockwise when looking down `-axis`, which
/// matches `Quat::from_axis_angle(axis, angle)`. Zero-length inputs yield `0`.
pub fn angle_of_rotation(direction: Vec3, axis: Vec3, reference: Vec3) -> f32 {
    let q = direction.normalize_or_zero();
    let r = reference.normalize_or_zero();
    if q == Vec3::ZERO || r == Vec3::ZERO {
        return 0.0;
    }

    let angle = q.dot(r).clamp(-1.0, 1.0).acos();
    let m = q.cross(r).normalize_or_zero();
    if axis.dot(m) < 0.0 { angle } else { -angle }
}

/// Round `value` to the nearest multiple of `step`: `floor((v + step/2) / step) * step`.
///
/// Non-positive or non-finite steps leave the value untouched.
pub fn snap_value(value: f32, step: f32) -> f32 {
    if !(step.is_finite() && step > 0.0) {
        return value;
    }
    ((value + step * 0.5) / step).floor() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_closest_points_skew_lines() {
        let c = closest_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.37, 0.0, 5.0),
            Vec3::new(3.37, 0.0, 4.0),
        )
        .unwrap();
        assert_relative_eq!(c.p.x, 3.37, epsilon = 1e-5);
        assert_eq!(c.p.y, 0.0);
        assert_eq!(c.p.z, 0.0);
        assert_relative_eq!(c.q.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_closest_points_parallel_is_none() {
        let c = closest_points(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Y + Vec3::X);
        assert!(c.is_none());
    }

    #[test]
    fn test_closest_point_on_line() {
        let p = closest_point(Vec3::ZERO, Vec3::Z, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_relative_eq!(p.z, 3.0);
        assert!(closest_point(Vec3::ONE, Vec3::ONE, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_intersect_plane() {
        let t = intersect_plane(Vec3::Z, Vec3::ZERO, Vec3::new(1.0, 1.0, 5.0), -Vec3::Z).unwrap();
        assert_relative_eq!(t, 5.0);
        assert!(intersect_plane(Vec3::Z, Vec3::ZERO, Vec3::Z, Vec3::X).is_none());
    }

    #[test]
    fn test_project_point_to_plane() {
        let p = project_point_to_plane(Vec3::Y, Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 7.0, 3.0));
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_angle_of_rotation_sign() {
        let ccw = angle_of_rotation(Vec3::Y, Vec3::Z, Vec3::X);
        assert_relative_eq!(ccw, FRAC_PI_2, epsilon = 1e-6);
        let cw = angle_of_rotation(-Vec3::Y, Vec3::Z, Vec3::X);
        assert_relative_eq!(cw, -FRAC_PI_2, epsilon = 1e-6);

        // Angle must agree with Quat::from_axis_angle
        let q = glam::Quat::from_axis_angle(Vec3::Z, ccw);
        assert!((q * Vec3::X - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_angle_of_rotation_degenerate() {
        assert_eq!(angle_of_rotation(Vec3::ZERO, Vec3::Z, Vec3::X), 0.0);
        assert_eq!(angle_of_rotation(Vec3::X, Vec3::Z, Vec3::X), 0.0);
    }

    #[test]
    fn test_snap_value() {
        assert_eq!(snap_value(2.37, 1.0), 2.0);
        assert_eq!(snap_value(2.5, 1.0), 3.0);
        assert_eq!(snap_value(-0.26, 0.5), -0.5);
        assert_eq!(snap_value(1.234, 0.0), 1.234);
        assert_eq!(snap_value(1.234, -1.0), 1.234);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for step in [0.001_f32, 0.1, 0.25, 1.0, 15.0_f32.to_radians()] {
            for i in -200..200 {
                let v = i as f32 * 0.0371;
                let once = snap_value(v, step);
                assert_eq!(snap_value(once, step), once, "v={v} step={step}");
            }
        }
    }
}
