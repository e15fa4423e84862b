//! Idle animation as pure functions of elapsed seconds.

use crate::config::MotionConfig;

fn phase(t: f64, m: &MotionConfig) -> f64 {
    t * m.float_speed / 4.0
}

/// Rotation of the whole group about Y.
pub fn group_rotation_y(t: f64, m: &MotionConfig) -> f64 {
    t * m.group_spin
}

/// Vertical float offset added to a part's rendered position.
pub fn float_offset_y(t: f64, m: &MotionConfig) -> f64 {
    phase(t, m).sin() / 10.0 * m.float_intensity
}

/// Part rotation: slow spin about Y plus a small float wobble.
pub fn part_rotation(t: f64, m: &MotionConfig) -> [f64; 3] {
    let p = phase(t, m);
    let w = m.wobble_intensity;
    [
        p.cos() / 8.0 * w,
        t * m.part_spin + p.sin() / 8.0 * w,
        p.sin() / 20.0 * w,
    ]
}
