use ndhistogram::axis::BinInterval;

/// Coordinate that stands for a whole bin when its content is moved to
/// another binning.
///
/// Finite bins are represented by their centre. The underflow bin maps to
/// `-inf` and the overflow bin to `+inf`, so that flow content lands in the
/// flow bins of any other variable axis.
pub fn representative(bin: &BinInterval<f64>) -> f64 {
    match (bin.start(), bin.end()) {
        (Some(start), Some(end)) => 0.5 * (start + end),
        (None, _)                => f64::NEG_INFINITY,
        (_, None)                => f64::INFINITY,
    }
}
