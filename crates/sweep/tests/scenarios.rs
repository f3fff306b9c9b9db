use std::{convert::Infallible, thread, time::Duration};

use approx::assert_relative_eq;
use tbsweep::{
    CompareError, Parameter, ParameterAxis, ParameterSet, RedshiftGrid, SimulationInput,
    StudyError, TimeLimited, deviation,
    report::{Dedup, DeviationTable, EndpointSummary},
    run_sensitivity_study_unobserved,
    simulation::TimeLimitError,
    sweep::{self, Config, run_axis_sweep_unobserved, run_sweep_unobserved},
};
use tbsweep_core::Model;
use thiserror::Error;

fn grid() -> RedshiftGrid {
    RedshiftGrid::new([30.0, 20.0, 10.0]).unwrap()
}

fn standard() -> ParameterSet {
    ParameterSet::new(0.69, 0.31, 0.02).unwrap()
}

/// Mean 10 mK for the standard Hubble parameter, 12 mK for anything higher.
struct Step;

impl Model for Step {
    type Input = SimulationInput;
    type Output = Vec<f64>;
    type Error = Infallible;

    fn call(&self, input: &SimulationInput) -> Result<Vec<f64>, Self::Error> {
        let mean = if input.parameters.hubble() > 0.69 {
            12.0
        } else {
            10.0
        };
        Ok(vec![mean - 2.0, mean, mean + 2.0])
    }
}

#[derive(Debug, Error)]
#[error("baryon density {baryon} exceeds matter density {matter}")]
struct Unphysical {
    baryon: f64,
    matter: f64,
}

/// Rejects baryon > matter like a real simulation code.
struct Strict;

impl Model for Strict {
    type Input = SimulationInput;
    type Output = Vec<f64>;
    type Error = Unphysical;

    fn call(&self, input: &SimulationInput) -> Result<Vec<f64>, Self::Error> {
        let (baryon, matter) = (input.parameters.baryon(), input.parameters.matter());
        if baryon > matter {
            return Err(Unphysical { baryon, matter });
        }
        Ok(vec![input.redshift; 2])
    }
}

#[test]
fn baseline_and_perturbed_series_deviate_by_twenty_percent() {
    let config = Config::default();
    let baseline = run_sweep_unobserved(&Step, &grid(), &standard(), &config).unwrap();
    let perturbed = standard().with(Parameter::Hubble, 0.71).unwrap();
    let series = run_sweep_unobserved(&Step, &grid(), &perturbed, &config).unwrap();

    assert_eq!(
        baseline.millikelvin().collect::<Vec<_>>(),
        vec![10.0, 10.0, 10.0]
    );

    let percent = deviation(&series, &baseline).unwrap();
    assert_eq!(percent.len(), 3);
    for &value in percent.percent() {
        assert_relative_eq!(value, 20.0, epsilon = 1e-12);
    }

    let identity = deviation(&baseline, &baseline).unwrap();
    assert!(identity.percent().iter().all(|&value| value == 0.0));
}

#[test]
fn hubble_axis_has_three_keys_and_repeats_the_baseline() {
    let config = Config::default();
    let axis = ParameterAxis::new(Parameter::Hubble, [0.67, 0.69, 0.71]).unwrap();

    let sweep = run_axis_sweep_unobserved(&Step, &grid(), &standard(), &axis, &config).unwrap();
    let baseline = run_sweep_unobserved(&Step, &grid(), &standard(), &config).unwrap();

    assert_eq!(sweep.len(), 3);
    assert_eq!(sweep.get(0.69), Some(&baseline));
}

#[test]
fn unphysical_combination_fails_with_a_simulation_error() {
    let parameters = ParameterSet::new_unchecked(0.69, 0.3, 0.5);

    let result = run_sweep_unobserved(&Strict, &grid(), &parameters, &Config::default());

    match result {
        Err(sweep::Error::Simulation { source, .. }) => {
            assert!(source.to_string().contains("exceeds matter"));
        }
        other => panic!("expected a simulation error, got {other:?}"),
    }
}

#[test]
fn misaligned_series_cannot_be_compared() {
    let config = Config::default();
    let long = run_sweep_unobserved(&Step, &grid(), &standard(), &config).unwrap();
    let short_grid = RedshiftGrid::new([30.0, 20.0]).unwrap();
    let short = run_sweep_unobserved(&Step, &short_grid, &standard(), &config).unwrap();

    assert_eq!(
        deviation(&short, &long),
        Err(CompareError::Alignment {
            series_len: 2,
            baseline_len: 3
        })
    );
}

#[test]
fn study_feeds_reports() {
    let axes = vec![ParameterAxis::new(Parameter::Hubble, [0.67, 0.69, 0.71]).unwrap()];

    let result =
        run_sensitivity_study_unobserved(&Step, &grid(), &standard(), &axes, &Config::default())
            .unwrap();

    let table = DeviationTable::new(&result, Dedup::Exact).unwrap();
    assert_eq!(table.rows().len(), 2);

    let summary = EndpointSummary::new(&result, Dedup::Exact).unwrap();
    let text = summary.to_string();
    assert!(text.contains("h=0.67: 10.00 mK (Δ=+0.0%)"));
    assert!(text.contains("h=0.71: 12.00 mK (Δ=+20.0%)"));
}

#[test]
fn timeouts_are_evaluation_failures() {
    struct Stuck;

    impl Model for Stuck {
        type Input = SimulationInput;
        type Output = Vec<f64>;
        type Error = Infallible;

        fn call(&self, _input: &SimulationInput) -> Result<Vec<f64>, Self::Error> {
            thread::sleep(Duration::from_millis(500));
            Ok(vec![1.0])
        }
    }

    let model = TimeLimited::new(Stuck, Duration::from_millis(20));
    let axes = vec![ParameterAxis::new(Parameter::Matter, [0.31]).unwrap()];

    let result =
        run_sensitivity_study_unobserved(&model, &grid(), &standard(), &axes, &Config::default());

    match result {
        Err(StudyError::Baseline(sweep::Error::Simulation { index, source, .. })) => {
            assert_eq!(index, 0);
            assert!(matches!(
                source.downcast_ref::<TimeLimitError<Infallible>>(),
                Some(TimeLimitError::TimedOut { .. })
            ));
        }
        other => panic!("expected a baseline timeout, got {other:?}"),
    }
}

#[cfg(feature = "serde")]
#[test]
fn results_serialize_to_json() {
    let axes = vec![ParameterAxis::new(Parameter::Hubble, [0.69, 0.71]).unwrap()];
    let result =
        run_sensitivity_study_unobserved(&Step, &grid(), &standard(), &axes, &Config::default())
            .unwrap();

    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["grid"], serde_json::json!([30.0, 20.0, 10.0]));
    assert_eq!(json["baseline"]["values"], serde_json::json!([10.0, 10.0, 10.0]));
    assert_eq!(json["axes"][0]["parameter"], "hubble");
    assert_eq!(json["axes"][0]["entries"][1]["value"], 0.71);
}
