use rand::{rngs::StdRng, Rng, SeedableRng};

/// RGB color of a point at forward distance `x`, from green at the sensor to red at
/// `max_distance`.
///
/// The ramp value `|x - max| / max` is clamped to `[0, 1]`, points behind the sensor or beyond
/// twice the range saturate to red.
///
/// # Example
///
/// ```
/// use lidarcam_viz::color::distance_color;
///
/// assert_eq!(distance_color(0.0, 20.0), [255, 0, 0]);
/// assert_eq!(distance_color(20.0, 20.0), [0, 255, 0]);
/// ```
pub fn distance_color(x: f64, max_distance: f64) -> [u8; 3] {
    let val = ((x - max_distance) / max_distance).abs().clamp(0.0, 1.0);
    let red = (255.0 * val) as u8;
    let green = (255.0 * (1.0 - val)) as u8;
    [red, green, 0]
}

/// Deterministic RGB color of a cluster, every channel drawn from `[0, cap)`.
///
/// The same `box_id` always yields the same color.
pub fn box_color(box_id: i32, cap: u8) -> [u8; 3] {
    if cap == 0 {
        return [0, 0, 0];
    }
    let mut rng = StdRng::seed_from_u64(box_id as u64);
    [
        rng.random_range(0..cap),
        rng.random_range(0..cap),
        rng.random_range(0..cap),
    ]
}
