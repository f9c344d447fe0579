use glam::Vec2;

/// Unit vector in the direction of `v`, or zero for a (near) zero vector.
pub(crate) fn safe_normalize(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Counter-clockwise rotation by `radians`.
pub(crate) fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v)
}

fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Component-wise sign where zero stays zero (unlike `f32::signum`).
pub(crate) fn sign_vec(v: Vec2) -> Vec2 {
    Vec2::new(sign(v.x), sign(v.y))
}

/// Linear interpolation that snaps to `to` once within `snap_threshold`.
pub(crate) fn lerp_snap(from: Vec2, to: Vec2, amount: f32, snap_threshold: f32) -> Vec2 {
    let out = from.lerp(to, amount);
    if (out - to).length_squared() <= snap_threshold * snap_threshold {
        to
    } else {
        out
    }
}

pub(crate) fn lerp_rgba(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}
