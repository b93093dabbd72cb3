/// Round to `places` decimal digits, half away from zero.
pub fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round to one decimal digit. Gauge percentages and sizes all render this way.
pub fn round1(value: f64) -> f64 {
    round_dp(value, 1)
}

/// Convert a byte count to GiB with one decimal digit.
pub fn bytes_to_gib(bytes: i64) -> f64 {
    round1(bytes as f64 / 1024.0 / 1024.0 / 1024.0)
}

/// Convert a kubelet-style KiB capacity to GiB with one decimal digit.
pub fn kib_to_gib(kib: i64) -> f64 {
    round1(kib as f64 / 1024.0 / 1024.0)
}
