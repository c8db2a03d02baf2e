//! The heart curve: sprite outline and spawn points

use pinkboard_core::Vec2;
use std::f32::consts::PI;

/// Angle step used when tracing the outline for the sprite
pub const OUTLINE_STEP: f32 = 0.01;

/// Curve units that map onto one sprite width
pub const SPRITE_EXTENT: f32 = 350.0;

/// Point on the heart for `t` in [-π, π], in math coordinates (y up)
pub fn point_on_heart(t: f32) -> Vec2 {
    Vec2::new(
        160.0 * t.sin().powi(3),
        130.0 * t.cos() - 50.0 * (2.0 * t).cos() - 20.0 * (3.0 * t).cos()
            - 10.0 * (4.0 * t).cos()
            + 25.0,
    )
}

/// Map a uniform sample in [0, 1) onto the curve parameter range (π, -π]
pub fn spawn_angle(u: f32) -> f32 {
    PI - 2.0 * PI * u
}

/// Where a particle is born and how fast it leaves, in math coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Spawn on the curve for uniform sample `u`, launched radially outward
/// from the heart's origin at `speed`
pub fn spawn_on_heart(u: f32, speed: f32) -> Spawn {
    let position = point_on_heart(spawn_angle(u));
    Spawn {
        position,
        velocity: position.with_length(speed),
    }
}

/// Points from -π stepping by `step` until the parameter reaches π.
/// The final sample may overshoot π by less than one step.
pub fn outline(step: f32) -> impl Iterator<Item = Vec2> {
    let start = (step > 0.0).then_some(-PI);
    std::iter::successors(start, move |&t| (t < PI).then_some(t + step)).map(point_on_heart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_cleft_at_zero() {
        let p = point_on_heart(0.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 75.0).abs() < 1e-4);
    }

    #[test]
    fn bottom_tip_at_pi() {
        let p = point_on_heart(PI);
        assert!(p.x.abs() < 1e-3);
        assert!((p.y + 145.0).abs() < 1e-3);
        let q = point_on_heart(-PI);
        assert!((q.y - p.y).abs() < 1e-3);
    }

    #[test]
    fn curve_is_mirror_symmetric() {
        for i in 1..30 {
            let t = i as f32 * 0.1;
            let a = point_on_heart(t);
            let b = point_on_heart(-t);
            assert!((a.x + b.x).abs() < 1e-3);
            assert!((a.y - b.y).abs() < 1e-3);
        }
    }

    #[test]
    fn spawn_angle_covers_range() {
        assert!((spawn_angle(0.0) - PI).abs() < 1e-6);
        assert!((spawn_angle(0.5)).abs() < 1e-6);
        assert!(spawn_angle(0.999_999) > -PI);
    }

    #[test]
    fn spawn_velocity_is_radial_with_configured_speed() {
        for i in 0..100 {
            let u = i as f32 / 100.0;
            let spawn = spawn_on_heart(u, 100.0);
            if spawn.position.length() < 1e-3 {
                continue;
            }
            assert!((spawn.velocity.length() - 100.0).abs() < 1e-2);
            let dir_p = spawn.position.normalized();
            let dir_v = spawn.velocity.normalized();
            assert!(dir_p.perp_dot(&dir_v).abs() < 1e-4);
            assert!(dir_p.dot(&dir_v) > 0.0);
        }
    }

    #[test]
    fn outline_spans_the_full_turn() {
        let points: Vec<Vec2> = outline(OUTLINE_STEP).collect();
        // -π..π in 0.01 steps, plus the overshooting final sample
        assert!(points.len() >= 629 && points.len() <= 630);
        let first = points[0];
        assert!((first.y + 145.0).abs() < 1e-3);
    }

    #[test]
    fn outline_with_bad_step_is_empty() {
        assert_eq!(outline(0.0).count(), 0);
        assert_eq!(outline(-1.0).count(), 0);
    }
}
