//! Design file format versions.
//!
//! A version string `a.b.c[.d]` is compared as the number
//! `a*1_000_000 + b*10_000 + c*100 + d`, each part below 100.

/// Version written by this crate.
pub const CURRENT_VERSION: &str = "3.2.23";

/// Numeric form of [`CURRENT_VERSION`].
pub const CURRENT_VERSION_NUMBER: u32 = 3_022_300;

/// Files of exactly this version store label text in `content`.
pub const VERSION_3_1_0: u32 = 3_010_000;

/// Parse a version string into its comparable number.
pub fn parse_version(version: &str) -> Result<u32, String> {
    let version = version.trim();
    if version.is_empty() {
        return Err("version is empty".to_string());
    }

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() > 4 {
        return Err(format!("version '{version}' has more than four parts"));
    }

    let mut number = 0u32;
    let weights = [1_000_000u32, 10_000, 100, 1];
    for (part, weight) in parts.iter().zip(weights) {
        let value: u32 = part
            .parse()
            .map_err(|_| format!("version '{version}' has a non-numeric part '{part}'"))?;
        if value >= 100 {
            return Err(format!("version '{version}' has an out-of-range part '{part}'"));
        }
        number += value * weight;
    }
    Ok(number)
}
