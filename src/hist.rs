use ndhistogram::{ndhistogram, Histogram, HistND};

use binning::{Axis, Edges};

use crate::error::{Result, SampleError};

pub type Hist1D = HistND<(Axis,              ), f64>;
pub type Hist2D = HistND<(Axis, Axis        ), f64>;
pub type Hist3D = HistND<(Axis, Axis, Axis  ), f64>;

pub fn hist_1d(x: &Edges) -> Hist1D { ndhistogram!(x.axis(); f64) }

pub fn hist_2d(x: &Edges, y: &Edges) -> Hist2D { ndhistogram!(x.axis(), y.axis(); f64) }

pub fn hist_3d(x: &Edges, y: &Edges, z: &Edges) -> Hist3D {
    ndhistogram!(x.axis(), y.axis(), z.axis(); f64)
}

/// Coordinates of one entry in a 1-, 2- or 3-dimensional histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coords {
    One  (f64),
    Two  (f64, f64),
    Three(f64, f64, f64),
}

impl Coords {
    pub fn dimension(&self) -> usize {
        match self {
            Coords::One  (..) => 1,
            Coords::Two  (..) => 2,
            Coords::Three(..) => 3,
        }
    }

    /// Any coordinate NaN? Such entries cannot be placed in any bin.
    pub fn has_nan(&self) -> bool {
        match *self {
            Coords::One  (x      ) => x.is_nan(),
            Coords::Two  (x, y   ) => x.is_nan() || y.is_nan(),
            Coords::Three(x, y, z) => x.is_nan() || y.is_nan() || z.is_nan(),
        }
    }
}

impl TryFrom<&[f64]> for Coords {
    type Error = SampleError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match *values {
            [x]       => Ok(Coords::One(x)),
            [x, y]    => Ok(Coords::Two(x, y)),
            [x, y, z] => Ok(Coords::Three(x, y, z)),
            _         => Err(SampleError::InvalidDimension(values.len())),
        }
    }
}

impl From<f64>             for Coords { fn from(x: f64)                   -> Self { Coords::One(x) } }
impl From<(f64, f64)>      for Coords { fn from((x, y): (f64, f64))       -> Self { Coords::Two(x, y) } }
impl From<(f64, f64, f64)> for Coords { fn from((x, y, z): (f64, f64, f64)) -> Self { Coords::Three(x, y, z) } }

/// Histogram belonging to one selection channel. The dimensionality is fixed
/// when the histogram is made.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionHist {
    OneD  (Hist1D),
    TwoD  (Hist2D),
    ThreeD(Hist3D),
}

impl SelectionHist {

    /// One histogram axis per element of `axes`.
    pub fn new(axes: &[Edges]) -> Result<Self> {
        match axes {
            [x]       => Ok(SelectionHist::OneD  (hist_1d(x))),
            [x, y]    => Ok(SelectionHist::TwoD  (hist_2d(x, y))),
            [x, y, z] => Ok(SelectionHist::ThreeD(hist_3d(x, y, z))),
            _         => Err(SampleError::InvalidDimension(axes.len())),
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            SelectionHist::OneD  (_) => 1,
            SelectionHist::TwoD  (_) => 2,
            SelectionHist::ThreeD(_) => 3,
        }
    }

    /// Add one unit-weight entry. Returns `false`, without filling anything,
    /// if the number of coordinates does not match the dimensionality.
    /// Entries with a NaN coordinate are dropped.
    pub fn fill(&mut self, coords: &Coords) -> bool {
        if coords.dimension() != self.dimension() { return false }
        if coords.has_nan() { return true }
        match (self, *coords) {
            (SelectionHist::OneD  (h), Coords::One  (x      )) => h.fill(&x),
            (SelectionHist::TwoD  (h), Coords::Two  (x, y   )) => h.fill(&(x, y)),
            (SelectionHist::ThreeD(h), Coords::Three(x, y, z)) => h.fill(&(x, y, z)),
            _ => {}
        }
        true
    }

    /// Content of the bin containing `coords`, or `None` on an arity mismatch.
    pub fn value(&self, coords: &Coords) -> Option<f64> {
        match (self, *coords) {
            (SelectionHist::OneD  (h), Coords::One  (x      )) => h.value(&x).copied(),
            (SelectionHist::TwoD  (h), Coords::Two  (x, y   )) => h.value(&(x, y)).copied(),
            (SelectionHist::ThreeD(h), Coords::Three(x, y, z)) => h.value(&(x, y, z)).copied(),
            _ => None,
        }
    }

    /// All bin contents, flow bins included, in `ndhistogram` index order.
    pub fn values(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        match self {
            SelectionHist::OneD  (h) => h.values(),
            SelectionHist::TwoD  (h) => h.values(),
            SelectionHist::ThreeD(h) => h.values(),
        }
    }

    fn values_mut(&mut self) -> Box<dyn Iterator<Item = &mut f64> + '_> {
        match self {
            SelectionHist::OneD  (h) => h.values_mut(),
            SelectionHist::TwoD  (h) => h.values_mut(),
            SelectionHist::ThreeD(h) => h.values_mut(),
        }
    }

    /// Sum of all bin contents, including under- and overflow.
    pub fn integral(&self) -> f64 { self.values().sum() }

    pub fn scale(&mut self, k: f64) { self.values_mut().for_each(|v| *v *= k) }

    pub fn clear(&mut self) { self.values_mut().for_each(|v| *v = 0.0) }
}

/// Multiply every bin of a 1-D histogram by `k`.
pub fn scale_1d(hist: &mut Hist1D, k: f64) { hist.values_mut().for_each(|v| *v *= k) }

pub fn clear_1d(hist: &mut Hist1D) { hist.values_mut().for_each(|v| *v = 0.0) }

pub fn integral_1d(hist: &Hist1D) -> f64 { hist.values().sum() }

/// Fill `hist` once per value with weight `weight`, dropping NaNs. Returns
/// the number of values dropped.
pub fn fill_1d(hist: &mut Hist1D, vals: impl IntoIterator<Item = f64>, weight: f64) -> usize {
    let mut dropped = 0;
    for v in vals {
        if v.is_nan() { dropped += 1; continue }
        hist.fill_with(&v, weight);
    }
    dropped
}


#[cfg(test)]
mod test_selection_hist {
    use super::*;
    use float_eq::assert_float_eq;
    use rstest::rstest;

    fn edges(e: &[f64]) -> Edges { Edges::try_from(e).unwrap() }

    #[test]
    fn dimensionality_follows_axes() {
        let e = edges(&[0.0, 1.0, 2.0]);
        assert_eq!(SelectionHist::new(&[e.clone()]).unwrap().dimension(), 1);
        assert_eq!(SelectionHist::new(&[e.clone(), e.clone()]).unwrap().dimension(), 2);
        assert_eq!(SelectionHist::new(&[e.clone(), e.clone(), e.clone()]).unwrap().dimension(), 3);
        assert_eq!(SelectionHist::new(&[]), Err(SampleError::InvalidDimension(0)));
        assert_eq!(SelectionHist::new(&[e.clone(), e.clone(), e.clone(), e]),
                   Err(SampleError::InvalidDimension(4)));
    }

    #[test]
    fn fill_rejects_wrong_arity() {
        let e = edges(&[0.0, 1.0, 2.0]);
        let mut h = SelectionHist::new(&[e.clone(), e]).unwrap();
        assert!(!h.fill(&Coords::One(0.5)));
        assert!(!h.fill(&Coords::Three(0.5, 0.5, 0.5)));
        assert_eq!(h.integral(), 0.0);
        assert!(h.fill(&Coords::Two(0.5, 1.5)));
        assert_eq!(h.value(&Coords::Two(0.1, 1.9)), Some(1.0));
        assert_eq!(h.value(&Coords::One(0.1)), None);
    }

    #[rstest(/**/ coords,
             case(Coords::One  (f64::NAN)),
             case(Coords::Two  (0.5, f64::NAN)),
             case(Coords::Two  (f64::NAN, 0.5)),
             case(Coords::Three(0.5, 0.5, f64::NAN)),
    )]
    fn nan_entries_dropped(coords: Coords) {
        let e = edges(&[0.0, 1.0]);
        let axes = vec![e; coords.dimension()];
        let mut h = SelectionHist::new(&axes).unwrap();
        assert!(coords.has_nan());
        assert!(h.fill(&coords));
        assert_eq!(h.integral(), 0.0);
    }

    #[test]
    fn infinities_land_in_flow_bins() {
        let mut h = SelectionHist::new(&[edges(&[0.0, 1.0])]).unwrap();
        assert!(h.fill(&Coords::One(f64::INFINITY)));
        assert!(h.fill(&Coords::One(f64::NEG_INFINITY)));
        assert_eq!(h.value(&Coords::One(5.0)), Some(1.0));
        assert_eq!(h.value(&Coords::One(-5.0)), Some(1.0));
    }

    #[test]
    fn fill_1d_skips_nan() {
        let mut h = hist_1d(&edges(&[0.0, 1.0, 2.0]));
        let dropped = fill_1d(&mut h, [0.5, f64::NAN, 1.5, f64::NAN], 2.0);
        assert_eq!(dropped, 2);
        assert_eq!(integral_1d(&h), 4.0);
    }

    #[test]
    fn scale_and_clear() {
        let mut h = SelectionHist::new(&[edges(&[0.0, 1.0, 2.0])]).unwrap();
        for x in [0.5, 1.5, 1.5, 7.0] { h.fill(&x.into()); }
        assert_float_eq!(h.integral(), 4.0, ulps <= 1);
        h.scale(2.5);
        assert_float_eq!(h.integral(), 10.0, ulps <= 1);
        assert_float_eq!(h.value(&Coords::One(1.2)).unwrap(), 5.0, ulps <= 1);
        // overflow entry is scaled as well
        assert_float_eq!(h.value(&Coords::One(99.0)).unwrap(), 2.5, ulps <= 1);
        h.clear();
        assert_eq!(h.integral(), 0.0);
    }
}
