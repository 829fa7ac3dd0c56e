//! Visual encoding of reflectivity values.
//!
//! Two pure step functions over the dBZ threshold ladder. Boundaries are
//! closed on the right of each bucket: exactly 20.0 dBZ resolves to the
//! second bucket, not the first. Out-of-range inputs (negative, or far above
//! any plausible return) are not rejected; they ride the same ladder.
//!
//! Marker color is never computed here. The feed supplies a hex color per
//! sample and it passes through to the rendering layer unmodified.

/// Marker radius in pixels for a reflectivity value.
pub fn marker_radius(dbz: f64) -> f64 {
    if dbz >= 40.0 {
        9.0
    } else if dbz >= 30.0 {
        7.0
    } else if dbz >= 20.0 {
        5.0
    } else {
        3.0
    }
}

/// Marker fill opacity for a reflectivity value.
pub fn fill_opacity(dbz: f64) -> f64 {
    if dbz >= 40.0 {
        0.9
    } else if dbz >= 30.0 {
        0.8
    } else if dbz >= 20.0 {
        0.7
    } else {
        0.6
    }
}
