//! # Nearest-Pixel Lookup
//!
//! Axis-wise nearest neighbour: each axis is searched independently for the
//! entry closest in value to the target. This is not a geodesic search.

/// Index of the axis entry minimizing `|axis[i] - target|`.
///
/// Ties resolve to the first minimal index in storage order. Returns `None`
/// for an empty axis.
///
/// # Examples
///
/// ```rust
/// use fused_xch4::locator::nearest_index;
///
/// let axis = [10.0, 20.0, 30.0];
/// assert_eq!(nearest_index(&axis, 19.0), Some(1));
/// assert_eq!(nearest_index(&axis, 15.0), Some(0));
/// ```
pub fn nearest_index<'a, I>(axis: I, target: f64) -> Option<usize>
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in axis.into_iter().enumerate() {
        let distance = (value - target).abs();
        match best {
            // strict comparison keeps the earliest index on ties
            Some((_, best_distance)) if !(distance < best_distance) => {}
            _ => best = Some((idx, distance)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Nearest `(lat_idx, lon_idx)` for a target coordinate, one axis at a time.
pub fn nearest_pixel<'a, 'b, L, M>(
    latitude: L,
    longitude: M,
    target_lat: f64,
    target_lon: f64,
) -> Option<(usize, usize)>
where
    L: IntoIterator<Item = &'a f64>,
    M: IntoIterator<Item = &'b f64>,
{
    Some((
        nearest_index(latitude, target_lat)?,
        nearest_index(longitude, target_lon)?,
    ))
}
