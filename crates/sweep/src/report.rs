//! Views of a [`SweepResult`] for tables and summaries.
//!
//! Nothing here runs the simulation. Every view is derived on demand from
//! the result and the baseline comparator.

use std::fmt;

use crate::{
    compare::{CompareError, DeviationSeries, deviation, deviation_at},
    params::Parameter,
    reduce::Observable,
    series::Series,
    study::SweepResult,
};

/// Which axis values count as duplicates of the baseline.
///
/// Axes usually include the baseline's own value, so its series repeats the
/// baseline series. Reports normally leave it out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dedup {
    /// Drop values exactly equal to the baseline value.
    #[default]
    Exact,

    /// Drop values within an absolute tolerance of the baseline value.
    Tolerance(f64),

    /// Keep every value.
    Keep,
}

impl Dedup {
    #[allow(clippy::float_cmp)]
    fn is_duplicate(self, value: f64, standard: f64) -> bool {
        match self {
            Self::Exact => value == standard,
            Self::Tolerance(eps) => (value - standard).abs() <= eps,
            Self::Keep => false,
        }
    }
}

/// One perturbed series of a study.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variation<'a> {
    pub parameter: Parameter,
    pub value: f64,
    pub series: &'a Series,
}

/// Returns every perturbed series in axis order, minus baseline duplicates.
#[must_use]
pub fn variations(result: &SweepResult, dedup: Dedup) -> Vec<Variation<'_>> {
    let baseline = result.baseline().parameters();

    result
        .axes()
        .iter()
        .flat_map(|axis| {
            let parameter = axis.parameter();
            let standard = baseline.get(parameter);
            axis.iter()
                .filter(move |&(value, _)| !dedup.is_duplicate(value, standard))
                .map(move |(value, series)| Variation {
                    parameter,
                    value,
                    series,
                })
        })
        .collect()
}

/// A deviation series, or the grid index where the baseline was zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Deviation {
    Defined(DeviationSeries),
    Undefined { index: usize },
}

impl Deviation {
    #[must_use]
    pub fn as_defined(&self) -> Option<&DeviationSeries> {
        match self {
            Self::Defined(series) => Some(series),
            Self::Undefined { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviationRow {
    pub parameter: Parameter,
    pub value: f64,
    pub deviation: Deviation,
}

/// Percent deviation from the baseline for every variation of a study.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviationTable {
    redshifts: Vec<f64>,
    rows: Vec<DeviationRow>,
}

impl DeviationTable {
    /// Builds the table.
    ///
    /// A zero in the baseline makes a row [`Deviation::Undefined`] instead of
    /// failing the whole table.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Alignment`] if a series does not match the
    /// baseline's length.
    pub fn new(result: &SweepResult, dedup: Dedup) -> Result<Self, CompareError> {
        let baseline = result.baseline();

        let rows = variations(result, dedup)
            .into_iter()
            .map(|variation| {
                let deviation = match deviation(variation.series, baseline) {
                    Ok(series) => Deviation::Defined(series),
                    Err(CompareError::DivisionByZero { index }) => Deviation::Undefined { index },
                    Err(err) => return Err(err),
                };
                Ok(DeviationRow {
                    parameter: variation.parameter,
                    value: variation.value,
                    deviation,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            redshifts: result.grid().as_slice().to_vec(),
            rows,
        })
    }

    #[must_use]
    pub fn redshifts(&self) -> &[f64] {
        &self.redshifts
    }

    #[must_use]
    pub fn rows(&self) -> &[DeviationRow] {
        &self.rows
    }

    /// Returns the rows for one parameter, in axis order.
    pub fn rows_for(&self, parameter: Parameter) -> impl Iterator<Item = &DeviationRow> {
        self.rows.iter().filter(move |row| row.parameter == parameter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EndpointEntry {
    pub parameter: Parameter,
    pub value: f64,
    pub observable: Observable,

    /// Percent deviation from the baseline, `None` if the baseline is zero.
    pub percent: Option<f64>,
}

/// The observable at the lowest redshift of the grid, baseline and variations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EndpointSummary {
    redshift: f64,
    baseline: Observable,
    entries: Vec<EndpointEntry>,
}

impl EndpointSummary {
    /// Builds the summary at the final grid redshift.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Alignment`] if a series does not match the
    /// baseline's length.
    pub fn new(result: &SweepResult, dedup: Dedup) -> Result<Self, CompareError> {
        let standard = result.baseline();
        let index = standard.len().saturating_sub(1);
        let baseline = standard.get(index).ok_or(CompareError::IndexOutOfRange {
            index,
            len: standard.len(),
        })?;

        let mut entries = Vec::new();
        for variation in variations(result, dedup) {
            let percent = match deviation_at(variation.series, standard, index) {
                Ok(percent) => Some(percent),
                Err(CompareError::DivisionByZero { .. }) => None,
                Err(err) => return Err(err),
            };
            let observable = variation
                .series
                .get(index)
                .ok_or(CompareError::IndexOutOfRange {
                    index,
                    len: variation.series.len(),
                })?;

            entries.push(EndpointEntry {
                parameter: variation.parameter,
                value: variation.value,
                observable,
                percent,
            });
        }

        Ok(Self {
            redshift: result.grid().last(),
            baseline,
            entries,
        })
    }

    #[must_use]
    pub fn redshift(&self) -> f64 {
        self.redshift
    }

    #[must_use]
    pub fn baseline(&self) -> Observable {
        self.baseline
    }

    #[must_use]
    pub fn entries(&self) -> &[EndpointEntry] {
        &self.entries
    }
}

impl fmt::Display for EndpointSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "summary at z={}", self.redshift)?;
        writeln!(f, "baseline: {:.2}", self.baseline)?;

        for parameter in Parameter::ALL {
            let mut entries = self
                .entries
                .iter()
                .filter(|entry| entry.parameter == parameter)
                .peekable();
            if entries.peek().is_none() {
                continue;
            }

            writeln!(f)?;
            writeln!(f, "{} variations:", parameter.name())?;
            for entry in entries {
                write!(
                    f,
                    "  {}={}: {:.2}",
                    parameter.symbol(),
                    entry.value,
                    entry.observable
                )?;
                match entry.percent {
                    Some(percent) => writeln!(f, " (Δ={percent:+.1}%)")?,
                    None => writeln!(f, " (Δ undefined)")?,
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{grid::RedshiftGrid, params::ParameterSet, sweep::AxisSweep};

    fn standard() -> ParameterSet {
        ParameterSet::new(0.69, 0.31, 0.02).unwrap()
    }

    fn series(parameters: ParameterSet, values: &[f64]) -> Series {
        Series::new(
            parameters,
            values
                .iter()
                .copied()
                .map(Observable::from_millikelvin)
                .collect(),
        )
    }

    fn hubble_axis<const N: usize>(values: &[(f64, [f64; N])]) -> AxisSweep {
        let mut axis = AxisSweep::new(Parameter::Hubble);
        for (value, observed) in values {
            let parameters = standard().with(Parameter::Hubble, *value).unwrap();
            axis.push(*value, series(parameters, observed));
        }
        axis
    }

    fn result(baseline: &[f64], axis: AxisSweep) -> SweepResult {
        SweepResult::new(
            RedshiftGrid::new([30.0, 20.0, 10.0]).unwrap(),
            series(standard(), baseline),
            vec![axis],
        )
    }

    #[test]
    fn exact_dedup_drops_the_baseline_value() {
        let result = result(
            &[10.0, 10.0, 10.0],
            hubble_axis(&[
                (0.67, [9.0, 9.0, 9.0]),
                (0.69, [10.0, 10.0, 10.0]),
                (0.71, [11.0, 11.0, 11.0]),
            ]),
        );

        let values: Vec<f64> = variations(&result, Dedup::Exact)
            .iter()
            .map(|variation| variation.value)
            .collect();
        assert_eq!(values, vec![0.67, 0.71]);

        assert_eq!(variations(&result, Dedup::Keep).len(), 3);
        assert_eq!(variations(&result, Dedup::Tolerance(0.05)).len(), 0);
    }

    #[test]
    fn table_marks_zero_baselines_as_undefined() {
        let result = result(
            &[10.0, 0.0, 10.0],
            hubble_axis(&[(0.67, [12.0, 1.0, 12.0]), (0.71, [8.0, 0.0, 8.0])]),
        );

        let table = DeviationTable::new(&result, Dedup::Exact).unwrap();

        assert_eq!(table.redshifts(), &[30.0, 20.0, 10.0]);
        assert_eq!(table.rows().len(), 2);
        for row in table.rows_for(Parameter::Hubble) {
            assert_eq!(row.deviation, Deviation::Undefined { index: 1 });
            assert!(row.deviation.as_defined().is_none());
        }
    }

    #[test]
    fn table_holds_defined_deviations() {
        let result = result(
            &[10.0, 10.0, 10.0],
            hubble_axis(&[(0.71, [12.0, 12.0, 12.0])]),
        );

        let table = DeviationTable::new(&result, Dedup::Exact).unwrap();

        let row = &table.rows()[0];
        assert_eq!(row.parameter, Parameter::Hubble);
        let deviation = row.deviation.as_defined().unwrap();
        for &percent in deviation.percent() {
            assert_relative_eq!(percent, 20.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn table_propagates_alignment_errors() {
        let result = result(&[10.0, 10.0, 10.0], hubble_axis(&[(0.71, [12.0, 12.0])]));

        assert_eq!(
            DeviationTable::new(&result, Dedup::Exact),
            Err(CompareError::Alignment {
                series_len: 2,
                baseline_len: 3
            })
        );
    }

    #[test]
    fn summary_reports_the_final_redshift() {
        let result = result(
            &[20.0, 15.0, 10.0],
            hubble_axis(&[
                (0.67, [19.0, 14.0, 9.0]),
                (0.69, [20.0, 15.0, 10.0]),
                (0.71, [21.0, 16.0, 11.5]),
            ]),
        );

        let summary = EndpointSummary::new(&result, Dedup::Exact).unwrap();

        assert_relative_eq!(summary.redshift(), 10.0);
        assert_relative_eq!(summary.baseline().millikelvin(), 10.0);
        assert_eq!(summary.entries().len(), 2);
        assert_relative_eq!(summary.entries()[0].percent.unwrap(), -10.0, epsilon = 1e-12);
        assert_relative_eq!(summary.entries()[1].percent.unwrap(), 15.0, epsilon = 1e-12);

        let text = summary.to_string();
        assert!(text.starts_with("summary at z=10\n"));
        assert!(text.contains("baseline: 10.00 mK"));
        assert!(text.contains("hubble variations:"));
        assert!(text.contains("  h=0.67: 9.00 mK (Δ=-10.0%)"));
        assert!(text.contains("  h=0.71: 11.50 mK (Δ=+15.0%)"));
        assert!(!text.contains("matter"));
    }

    #[test]
    fn summary_marks_a_zero_baseline() {
        let result = result(&[1.0, 1.0, 0.0], hubble_axis(&[(0.71, [1.0, 1.0, 2.0])]));

        let summary = EndpointSummary::new(&result, Dedup::Exact).unwrap();

        assert_eq!(summary.entries()[0].percent, None);
        assert!(summary.to_string().contains("(Δ undefined)"));
    }
}
