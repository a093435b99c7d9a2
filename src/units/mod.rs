//! # Unit conversions
//!
//! Pure numeric helpers shared by the metric encoder. Every function here is total over `f64`:
//! NaN and infinite inputs are passed through rather than rejected.
//!
//! ## Example
//!
//! ```rust
//! use m5_metrics::units::{human_rate, kelvin_to_celsius, mb_to_gb};
//!
//! assert_eq!(mb_to_gb(4096.0), 4.0);
//! assert_eq!(human_rate(2048.0, 0), (2.0, "K"));
//! assert!((kelvin_to_celsius(373.15) - 100.0).abs() < 1e-9);
//! ```

/// Bytes in one gibibyte
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Megabytes in one gigabyte
pub const MB_PER_GB: f64 = 1024.0;

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Magnitude at which [`human_rate`] steps to the next suffix
pub const RATE_THRESHOLD: f64 = 1000.0;

/// Suffixes used by [`human_rate`], indexed by the number of 1024 divisions
pub const SIZE_SUFFIXES: [&str; 9] = ["", "K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Converts bytes to gigabytes, truncated (never rounded up) to one decimal place.
pub fn bytes_to_gb(bytes: f64) -> f64 {
    truncate_one_decimal(bytes / BYTES_PER_GB)
}

/// Converts megabytes to gigabytes, truncated (never rounded up) to one decimal place.
pub fn mb_to_gb(megabytes: f64) -> f64 {
    truncate_one_decimal(megabytes / MB_PER_GB)
}

fn truncate_one_decimal(value: f64) -> f64 {
    (value * 10.0).floor() / 10.0
}

/// Scales a byte rate into a displayable magnitude below 1000 plus a size suffix.
///
/// The value is rounded to `decimals` places before every threshold test, so `1023` becomes
/// `(1, "K")`: it is at least 1000 and rounds to 1 after one division by 1024. Midpoints round
/// to even (`2560` is `(2, "K")`). Negative rates are scaled by magnitude and keep their sign on
/// the value; the suffix never carries a sign.
pub fn human_rate(value: f64, decimals: u32) -> (f64, &'static str) {
    if value < 0.0 {
        let (scaled, suffix) = human_rate(-value, decimals);
        return (-scaled, suffix);
    }

    let mut index = 0;
    let mut scaled = round_half_even(value, decimals);
    while round_half_even(scaled, decimals) >= RATE_THRESHOLD && index < SIZE_SUFFIXES.len() - 1 {
        scaled /= 1024.0;
        index += 1;
    }

    (round_half_even(scaled, decimals), SIZE_SUFFIXES[index])
}

/// Converts a Kelvin reading to Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Rounds half away from zero to the given number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Rounds to the given number of decimal places, sending exact midpoints to the even neighbour.
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
