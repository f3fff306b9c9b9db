use crate::{params::ParameterSet, reduce::Observable};

/// Mean brightness temperature at every redshift of a grid, for one parameter set.
///
/// Values align index-for-index with the [`RedshiftGrid`](crate::RedshiftGrid)
/// the series was computed on. A series is only ever built complete; the
/// sweep never hands out one with missing points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Series {
    parameters: ParameterSet,
    values: Vec<Observable>,
}

impl Series {
    pub(crate) fn new(parameters: ParameterSet, values: Vec<Observable>) -> Self {
        Self { parameters, values }
    }

    /// Returns the parameter set this series was computed for.
    #[must_use]
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[Observable] {
        &self.values
    }

    /// Returns the observable at grid index `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Observable> {
        self.values.get(index).copied()
    }

    /// Returns the observable at the final grid redshift.
    #[must_use]
    pub fn last(&self) -> Option<Observable> {
        self.values.last().copied()
    }

    /// Iterates over the values in millikelvin.
    pub fn millikelvin(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.values.iter().map(|value| value.millikelvin())
    }
}
