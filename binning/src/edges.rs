use thiserror::Error;

use crate::Axis;

/// Reasons why a list of numbers cannot be used as bin edges.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EdgesError {
    #[error("need at least two bin edges, got {0}")]
    TooFew(usize),

    #[error("bin edge {index} is not finite ({value})")]
    NotFinite { index: usize, value: f64 },

    #[error("bin edges must be strictly increasing: edge {index} ({value}) does not exceed {previous}")]
    NotIncreasing { index: usize, value: f64, previous: f64 },
}

/// Strictly increasing, finite bin edges: `n + 1` edges describe `n` bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Edges(Vec<f64>);

impl Edges {

    pub fn new(edges: Vec<f64>) -> Result<Self, EdgesError> {
        if edges.len() < 2 { return Err(EdgesError::TooFew(edges.len())) }
        for (index, &value) in edges.iter().enumerate() {
            if !value.is_finite() { return Err(EdgesError::NotFinite { index, value }) }
        }
        for (index, pair) in edges.windows(2).enumerate() {
            let (previous, value) = (pair[0], pair[1]);
            if value <= previous {
                return Err(EdgesError::NotIncreasing { index: index + 1, value, previous })
            }
        }
        Ok(Self(edges))
    }

    /// Number of bins, excluding under- and overflow.
    pub fn len_bins(&self) -> usize { self.0.len() - 1 }

    pub fn as_slice(&self) -> &[f64] { &self.0 }

    /// `ndhistogram` axis with these edges, plus underflow and overflow bins.
    pub fn axis(&self) -> Axis { Axis::new(self.0.iter().copied()) }
}

impl TryFrom<Vec<f64>> for Edges {
    type Error = EdgesError;
    fn try_from(edges: Vec<f64>) -> Result<Self, Self::Error> { Self::new(edges) }
}

impl TryFrom<&[f64]> for Edges {
    type Error = EdgesError;
    fn try_from(edges: &[f64]) -> Result<Self, Self::Error> { Self::new(edges.to_vec()) }
}

#[cfg(test)]
mod test_edges {
    use super::*;
    use rstest::rstest;
    use pretty_assertions::assert_eq;

    #[rstest(/**/ edges                      , expected,
             case(vec![]                     , EdgesError::TooFew(0)),
             case(vec![1.0]                  , EdgesError::TooFew(1)),
             case(vec![0.0, f64::NAN]        , EdgesError::NotFinite { index: 1, value: f64::NAN }),
             case(vec![0.0, 1.0, 1.0]        , EdgesError::NotIncreasing { index: 2, value: 1.0, previous: 1.0 }),
             case(vec![0.0, 2.0, 1.0]        , EdgesError::NotIncreasing { index: 2, value: 1.0, previous: 2.0 }),
             case(vec![f64::NEG_INFINITY, 0.0], EdgesError::NotFinite { index: 0, value: f64::NEG_INFINITY }),
    )]
    fn rejected(edges: Vec<f64>, expected: EdgesError) {
        let err = Edges::new(edges).unwrap_err();
        // NaN != NaN, so compare the rendered messages
        assert_eq!(err.to_string(), expected.to_string());
    }

    #[test]
    fn accepted() {
        let edges = Edges::new(vec![0.0, 0.5, 2.0, 10.0]).unwrap();
        assert_eq!(edges.len_bins(), 3);
        assert_eq!(edges.as_slice(), &[0.0, 0.5, 2.0, 10.0]);
    }

    #[test]
    fn axis_has_flow_bins() {
        use ndhistogram::axis::Axis as _;
        let axis = Edges::new(vec![0.0, 1.0, 3.0]).unwrap().axis();
        assert_eq!(axis.num_bins(), 2 + 2);
        assert_eq!(axis.index(&-0.1), Some(0));
        assert_eq!(axis.index(& 0.0), Some(1));
        assert_eq!(axis.index(& 1.0), Some(2));
        assert_eq!(axis.index(& 2.9), Some(2));
        assert_eq!(axis.index(& 3.0), Some(3));
    }
}
