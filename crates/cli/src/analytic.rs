//! A closed-form stand-in for the external simulation.
//!
//! The mean follows the linear-theory 21cm brightness temperature,
//!
//! ```text
//! T_b ≈ 27 x_HI (Ω_b h² / 0.023) sqrt(0.15 / (Ωₘ h²) · (1 + z) / 10) (1 − T_CMB / T_s) mK
//! ```
//!
//! with smooth toy histories for reionization, Lyman-α coupling and X-ray
//! heating. Each call returns a box of cells modulated by a Gaussian density
//! contrast drawn from a fixed seed, so repeated calls are identical and every
//! parameter set sees the same realization.

use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use tbsweep::{ParameterSet, SimulationInput};
use tbsweep_core::Model;
use thiserror::Error;

/// CMB temperature today, in K.
const T_CMB_TODAY: f64 = 2.725;

/// Redshift below which the gas cools adiabatically on its own.
const DECOUPLING_REDSHIFT: f64 = 150.0;

const REIONIZATION_REDSHIFT: f64 = 8.0;
const REIONIZATION_WIDTH: f64 = 1.0;

/// Peak Lyman-α coupling coefficient.
const COUPLING: f64 = 20.0;
const COUPLING_REDSHIFT: f64 = 18.0;
const COUPLING_WIDTH: f64 = 2.0;

/// Peak X-ray heating of the gas, in K.
const HEATING: f64 = 1000.0;
const HEATING_REDSHIFT: f64 = 12.0;
const HEATING_WIDTH: f64 = 1.5;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AnalyticError {
    #[error("baryon density {baryon} exceeds matter density {matter}")]
    BaryonExceedsMatter { baryon: f64, matter: f64 },

    #[error("matter density must be positive, got {0}")]
    NoMatter(f64),

    #[error("hubble parameter must be positive, got {0}")]
    NoExpansion(f64),

    #[error("box of {0}³ cells is too large")]
    BoxTooLarge(u32),

    #[error("invalid density contrast at z = {0}")]
    Density(f64),
}

/// The analytic brightness-temperature model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticModel {
    cells: usize,
    seed: u64,
}

impl AnalyticModel {
    /// Creates a model producing `box_cells³` cells per call.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell count does not fit in memory indexing.
    pub fn new(box_cells: u32, seed: u64) -> Result<Self, AnalyticError> {
        let cells = usize::try_from(box_cells)
            .ok()
            .and_then(|side| side.checked_pow(3))
            .ok_or(AnalyticError::BoxTooLarge(box_cells))?;
        Ok(Self { cells, seed })
    }

    #[must_use]
    pub fn cells(&self) -> usize {
        self.cells
    }
}

impl Model for AnalyticModel {
    type Input = SimulationInput;
    type Output = Vec<f64>;
    type Error = AnalyticError;

    fn call(&self, input: &SimulationInput) -> Result<Vec<f64>, AnalyticError> {
        let SimulationInput {
            redshift,
            parameters,
        } = *input;
        check(&parameters)?;

        let mean = mean_brightness(redshift, &parameters);
        let contrast = Normal::new(0.0, density_spread(redshift))
            .map_err(|_| AnalyticError::Density(redshift))?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        Ok((0..self.cells)
            .map(|_| mean * (1.0 + contrast.sample(&mut rng).max(-1.0)))
            .collect())
    }
}

fn check(parameters: &ParameterSet) -> Result<(), AnalyticError> {
    let (hubble, matter, baryon) = (parameters.hubble(), parameters.matter(), parameters.baryon());
    if hubble <= 0.0 {
        return Err(AnalyticError::NoExpansion(hubble));
    }
    if matter <= 0.0 {
        return Err(AnalyticError::NoMatter(matter));
    }
    if baryon > matter {
        return Err(AnalyticError::BaryonExceedsMatter { baryon, matter });
    }
    Ok(())
}

/// Mean brightness temperature of a uniform box, in mK.
pub(crate) fn mean_brightness(redshift: f64, parameters: &ParameterSet) -> f64 {
    let t_cmb = T_CMB_TODAY * (1.0 + redshift);
    let t_gas = T_CMB_TODAY * (1.0 + redshift).powi(2) / (1.0 + DECOUPLING_REDSHIFT)
        + HEATING * logistic(HEATING_REDSHIFT - redshift, HEATING_WIDTH);
    let coupling = COUPLING * logistic(COUPLING_REDSHIFT - redshift, COUPLING_WIDTH);
    let t_spin = (1.0 + coupling) / (1.0 / t_cmb + coupling / t_gas);
    let neutral = logistic(redshift - REIONIZATION_REDSHIFT, REIONIZATION_WIDTH);

    let h2 = parameters.hubble().powi(2);
    let baryons = parameters.baryon() * h2 / 0.023;
    let expansion = (0.15 / (parameters.matter() * h2) * (1.0 + redshift) / 10.0).sqrt();

    27.0 * neutral * baryons * expansion * (1.0 - t_cmb / t_spin)
}

/// Standard deviation of the density contrast, growing as 1 / (1 + z).
fn density_spread(redshift: f64) -> f64 {
    2.0 / (1.0 + redshift)
}

fn logistic(x: f64, width: f64) -> f64 {
    1.0 / (1.0 + (-x / width).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn standard() -> ParameterSet {
        ParameterSet::new(0.69, 0.31, 0.02).unwrap()
    }

    fn mean(field: &[f64]) -> f64 {
        tbsweep::reduce(field).unwrap().millikelvin()
    }

    #[test]
    fn absorption_trough_before_heating() {
        assert!(mean_brightness(20.0, &standard()) < -10.0);
        assert!(mean_brightness(5.0, &standard()) > 0.0);
    }

    #[test]
    fn brightness_scales_with_baryons() {
        let more = standard().with(tbsweep::Parameter::Baryon, 0.022).unwrap();
        let ratio = mean_brightness(20.0, &more) / mean_brightness(20.0, &standard());
        assert_relative_eq!(ratio, 1.1, epsilon = 1e-12);
    }

    #[test]
    fn field_mean_tracks_the_analytic_mean() {
        let model = AnalyticModel::new(16, 7).unwrap();
        let input = SimulationInput::new(15.0, standard());

        let field = model.call(&input).unwrap();

        assert_eq!(field.len(), 4096);
        assert_relative_eq!(
            mean(&field),
            mean_brightness(15.0, &standard()),
            max_relative = 0.02
        );
    }

    #[test]
    fn calls_are_deterministic() {
        let model = AnalyticModel::new(8, 42).unwrap();
        let input = SimulationInput::new(10.0, standard());

        assert_eq!(model.call(&input).unwrap(), model.call(&input).unwrap());
    }

    #[test]
    fn rejects_more_baryons_than_matter() {
        let model = AnalyticModel::new(4, 0).unwrap();
        let input = SimulationInput::new(10.0, ParameterSet::new_unchecked(0.69, 0.3, 0.5));

        assert_eq!(
            model.call(&input),
            Err(AnalyticError::BaryonExceedsMatter {
                baryon: 0.5,
                matter: 0.3
            })
        );
    }

    #[test]
    fn rejects_oversized_boxes() {
        assert_eq!(
            AnalyticModel::new(u32::MAX, 0),
            Err(AnalyticError::BoxTooLarge(u32::MAX))
        );
    }
}
