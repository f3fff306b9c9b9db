use crate::{
    grid::RedshiftGrid,
    params::Parameter,
    series::Series,
    sweep::AxisSweep,
};

/// Everything a sensitivity study computed.
///
/// Holds the grid, the baseline series, and one [`AxisSweep`] per axis in the
/// order the axes were given. It is built once and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepResult {
    grid: RedshiftGrid,
    baseline: Series,
    axes: Vec<AxisSweep>,
}

impl SweepResult {
    pub(crate) fn new(grid: RedshiftGrid, baseline: Series, axes: Vec<AxisSweep>) -> Self {
        Self {
            grid,
            baseline,
            axes,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &RedshiftGrid {
        &self.grid
    }

    #[must_use]
    pub fn baseline(&self) -> &Series {
        &self.baseline
    }

    #[must_use]
    pub fn axes(&self) -> &[AxisSweep] {
        &self.axes
    }

    /// Returns the sweep for one parameter, if the study varied it.
    #[must_use]
    pub fn axis(&self, parameter: Parameter) -> Option<&AxisSweep> {
        self.axes.iter().find(|axis| axis.parameter() == parameter)
    }

    /// Returns the series for one axis value, if it was computed.
    #[must_use]
    pub fn series(&self, parameter: Parameter, value: f64) -> Option<&Series> {
        self.axis(parameter).and_then(|axis| axis.get(value))
    }
}
