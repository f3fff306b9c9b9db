use tbsweep_core::{Model, Observer};

use crate::{
    grid::{RedshiftGrid, linspace_values},
    params::{Parameter, ParameterAxis, ParameterSet},
    simulation::SimulationInput,
    sweep::{Action, Config, Event},
};

use super::{StudyError, SweepResult, run_sensitivity_study};

/// The fixed inputs of a study: grid, baseline, and axes.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyPlan {
    pub grid: RedshiftGrid,
    pub baseline: ParameterSet,
    pub axes: Vec<ParameterAxis>,
}

impl StudyPlan {
    /// The reference study: 30 redshifts from 30 to 5, a Planck-like
    /// baseline (h = 0.69, Ωₘ = 0.31, Ω_b = 0.02), and a low/standard/high
    /// triple for each parameter.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            grid: RedshiftGrid::from_unchecked(linspace_values(30.0, 5.0, 30)),
            baseline: ParameterSet::new_unchecked(0.69, 0.31, 0.02),
            axes: vec![
                ParameterAxis::new_unchecked(Parameter::Hubble, vec![0.67, 0.69, 0.71]),
                ParameterAxis::new_unchecked(Parameter::Matter, vec![0.29, 0.31, 0.33]),
                ParameterAxis::new_unchecked(Parameter::Baryon, vec![0.018, 0.02, 0.022]),
            ],
        }
    }

    /// Returns the total number of simulation calls the plan needs.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        let series = 1 + self.axes.iter().map(|axis| axis.values().len()).sum::<usize>();
        series * self.grid.len()
    }

    /// Runs the study described by this plan.
    ///
    /// # Errors
    ///
    /// See [`run_sensitivity_study`].
    pub fn run<M, Obs>(
        &self,
        model: &M,
        config: &Config,
        observer: Obs,
    ) -> Result<SweepResult, StudyError>
    where
        M: Model<Input = SimulationInput> + Sync,
        M::Output: AsRef<[f64]>,
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        run_sensitivity_study(model, &self.grid, &self.baseline, &self.axes, config, observer)
    }
}
