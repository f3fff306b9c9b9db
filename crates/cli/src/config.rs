//! The study file format.
//!
//! Every section is optional; anything left out falls back to the reference
//! study. An empty axis list leaves that parameter out of the study.
//!
//! ```toml
//! [grid]
//! start = 30.0
//! end = 5.0
//! points = 30
//!
//! [baseline]
//! hubble = 0.69
//! matter = 0.31
//! baryon = 0.02
//!
//! [axes]
//! hubble = [0.67, 0.69, 0.71]
//! matter = [0.29, 0.31, 0.33]
//! baryon = []
//!
//! [run]
//! execution = "parallel"
//! timeout_secs = 120
//! skip_failures = true
//! dedup = { tolerance = 1e-6 }
//!
//! [simulation]
//! box_cells = 32
//! seed = 42
//! ```

use std::{fs, path::Path, time::Duration};

use color_eyre::eyre::{Result, WrapErr, ensure};
use serde::Deserialize;
use tbsweep::{
    Parameter, ParameterAxis, ParameterSet, RedshiftGrid, StudyPlan, report::Dedup,
    sweep::Execution,
};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    pub grid: GridConfig,
    pub baseline: BaselineConfig,
    pub axes: AxesConfig,
    pub run: RunConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: 30.0,
            end: 5.0,
            points: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaselineConfig {
    pub hubble: f64,
    pub matter: f64,
    pub baryon: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            hubble: 0.69,
            matter: 0.31,
            baryon: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxesConfig {
    pub hubble: Vec<f64>,
    pub matter: Vec<f64>,
    pub baryon: Vec<f64>,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            hubble: vec![0.67, 0.69, 0.71],
            matter: vec![0.29, 0.31, 0.33],
            baryon: vec![0.018, 0.02, 0.022],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub execution: Execution,
    pub timeout_secs: Option<u64>,
    pub skip_failures: bool,
    pub dedup: Dedup,
}

impl RunConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Cells along each side of the simulated box.
    pub box_cells: u32,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            box_cells: 32,
            seed: 42,
        }
    }
}

impl StudyConfig {
    /// Reads a study file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).wrap_err_with(|| format!("invalid study file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validates the grid, baseline and axes into a runnable plan.
    pub fn plan(&self) -> Result<StudyPlan> {
        let GridConfig { start, end, points } = self.grid;
        let grid = RedshiftGrid::linspace(start, end, points).wrap_err("invalid redshift grid")?;

        let BaselineConfig {
            hubble,
            matter,
            baryon,
        } = self.baseline;
        let baseline = ParameterSet::new(hubble, matter, baryon).wrap_err("invalid baseline")?;

        let mut axes = Vec::new();
        for (parameter, values) in [
            (Parameter::Hubble, &self.axes.hubble),
            (Parameter::Matter, &self.axes.matter),
            (Parameter::Baryon, &self.axes.baryon),
        ] {
            if values.is_empty() {
                continue;
            }
            let axis = ParameterAxis::new(parameter, values.iter().copied())
                .wrap_err_with(|| format!("invalid {parameter} axis"))?;
            if !axis.contains_baseline(&baseline) {
                tracing::warn!(%parameter, "axis does not include the baseline value");
            }
            axes.push(axis);
        }
        ensure!(!axes.is_empty(), "the study varies no parameters");

        ensure!(
            self.simulation.box_cells > 0,
            "simulation box needs at least one cell"
        );
        ensure!(
            self.run.timeout_secs != Some(0),
            "the simulation timeout must be at least one second"
        );

        Ok(StudyPlan {
            grid,
            baseline,
            axes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn empty_file_is_the_reference_study() {
        let config = StudyConfig::parse("").unwrap();

        assert_eq!(config, StudyConfig::default());
        assert_eq!(config.plan().unwrap(), StudyPlan::standard());
        assert_eq!(config.run.execution, Execution::Sequential);
        assert_eq!(config.run.dedup, Dedup::Exact);
        assert_eq!(config.run.timeout(), None);
    }

    #[test]
    fn bundled_study_file_matches_the_defaults() {
        let config = StudyConfig::parse(include_str!("../sensitivity.toml")).unwrap();
        assert_eq!(config, StudyConfig::default());
    }

    #[test]
    fn reads_every_section() {
        let config = StudyConfig::parse(
            r#"
            [grid]
            start = 20.0
            end = 10.0
            points = 3

            [baseline]
            hubble = 0.7

            [axes]
            hubble = [0.68, 0.7]
            baryon = []

            [run]
            execution = "parallel"
            timeout_secs = 90
            skip_failures = true
            dedup = { tolerance = 1e-6 }

            [simulation]
            box_cells = 8
            seed = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.run.execution, Execution::Parallel);
        assert_eq!(config.run.timeout(), Some(Duration::from_secs(90)));
        assert!(config.run.skip_failures);
        assert_eq!(config.run.dedup, Dedup::Tolerance(1e-6));
        assert_eq!(config.simulation.box_cells, 8);

        let plan = config.plan().unwrap();
        assert_eq!(plan.grid.as_slice(), &[20.0, 15.0, 10.0]);
        assert_relative_eq!(plan.baseline.hubble(), 0.7);
        assert_relative_eq!(plan.baseline.matter(), 0.31);

        let varied: Vec<_> = plan.axes.iter().map(ParameterAxis::parameter).collect();
        assert_eq!(varied, vec![Parameter::Hubble, Parameter::Matter]);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(StudyConfig::parse("[grid]\nstep = 1.0\n").is_err());
    }

    #[test]
    fn rejects_invalid_values() {
        let config = StudyConfig::parse("[baseline]\nbaryon = 0.5\n").unwrap();
        assert!(config.plan().is_err());

        let config = StudyConfig::parse("[grid]\nstart = 5.0\nend = 30.0\n").unwrap();
        assert!(config.plan().is_err());

        let config =
            StudyConfig::parse("[axes]\nhubble = []\nmatter = []\nbaryon = []\n").unwrap();
        assert!(config.plan().is_err());
    }

    #[test]
    fn rejects_a_zero_timeout() {
        let mut config = StudyConfig::parse("[run]\ntimeout_secs = 0\n").unwrap();
        let err = config.plan().unwrap_err();
        assert!(err.to_string().contains("timeout"));

        config.run.timeout_secs = Some(1);
        assert!(config.plan().is_ok());
    }
}
