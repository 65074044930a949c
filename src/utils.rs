// src/utils.rs

/// Percentage rounded for display, clamped to 0..=100.
pub fn rounded_percent(value: f64) -> u32 {
    value.clamp(0.0, 100.0).round() as u32
}

/// Progress-bar fraction for a percentage value.
pub fn percent_fraction(value: f64) -> f32 {
    (value.clamp(0.0, 100.0) / 100.0) as f32
}
