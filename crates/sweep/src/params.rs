//! Cosmological parameters and the axes along which they are perturbed.
//!
//! A [`ParameterSet`] holds the three parameters the sweep varies. Its
//! constructor enforces the physically valid ranges:
//!
//! - `hubble` in `(0, 1.5]`
//! - `matter` in `[0, 1]`
//! - `baryon` in `[0, matter]`
//!
//! A [`ParameterAxis`] names one [`Parameter`] and the ordered values to
//! substitute for it while the other two stay at their baseline values.

use std::fmt;

use thiserror::Error;

/// One of the three parameters a sweep can perturb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Parameter {
    /// Dimensionless Hubble parameter `h`.
    Hubble,
    /// Matter density `Ωₘ`.
    Matter,
    /// Baryon density `Ω_b`.
    Baryon,
}

impl Parameter {
    /// All parameters, in the order studies conventionally report them.
    pub const ALL: [Parameter; 3] = [Parameter::Hubble, Parameter::Matter, Parameter::Baryon];

    /// Returns the snake-case name used in configuration and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hubble => "hubble",
            Self::Matter => "matter",
            Self::Baryon => "baryon",
        }
    }

    /// Returns the conventional symbol used in reports.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Hubble => "h",
            Self::Matter => "Ωₘ",
            Self::Baryon => "Ω_b",
        }
    }

    /// Checks the range this parameter may take on its own.
    ///
    /// The coupling `baryon <= matter` is checked by [`ParameterSet::new`].
    fn check(self, value: f64) -> Result<(), ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NotFinite {
                parameter: self,
                value,
            });
        }

        let in_range = match self {
            Self::Hubble => value > 0.0 && value <= 1.5,
            Self::Matter | Self::Baryon => (0.0..=1.0).contains(&value),
        };

        if in_range {
            Ok(())
        } else {
            Err(ParameterError::OutOfRange {
                parameter: self,
                value,
                range: self.range(),
            })
        }
    }

    fn range(self) -> &'static str {
        match self {
            Self::Hubble => "(0, 1.5]",
            Self::Matter | Self::Baryon => "[0, 1]",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised when constructing parameter sets or axes.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("{parameter} must be finite, got {value}")]
    NotFinite { parameter: Parameter, value: f64 },

    #[error("{parameter} = {value} is outside {range}")]
    OutOfRange {
        parameter: Parameter,
        value: f64,
        range: &'static str,
    },

    #[error("baryon density {baryon} exceeds matter density {matter}")]
    BaryonExceedsMatter { baryon: f64, matter: f64 },

    #[error("{parameter} axis has no values")]
    EmptyAxis { parameter: Parameter },

    #[error("{parameter} axis repeats the value {value}")]
    DuplicateAxisValue { parameter: Parameter, value: f64 },
}

/// The cosmological parameters passed to the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParameterSet {
    hubble: f64,
    matter: f64,
    baryon: f64,
}

impl ParameterSet {
    /// Creates a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is non-finite or out of range, or if
    /// `baryon > matter`.
    pub fn new(hubble: f64, matter: f64, baryon: f64) -> Result<Self, ParameterError> {
        Parameter::Hubble.check(hubble)?;
        Parameter::Matter.check(matter)?;
        Parameter::Baryon.check(baryon)?;

        if baryon > matter {
            return Err(ParameterError::BaryonExceedsMatter { baryon, matter });
        }

        Ok(Self {
            hubble,
            matter,
            baryon,
        })
    }

    /// Creates a parameter set without validation.
    ///
    /// The simulation is the authority on which combinations it accepts.
    /// Use this to hand it combinations [`ParameterSet::new`] would refuse,
    /// for example when checking how an adapter reports invalid input.
    #[must_use]
    pub fn new_unchecked(hubble: f64, matter: f64, baryon: f64) -> Self {
        Self {
            hubble,
            matter,
            baryon,
        }
    }

    #[must_use]
    pub fn hubble(&self) -> f64 {
        self.hubble
    }

    #[must_use]
    pub fn matter(&self) -> f64 {
        self.matter
    }

    #[must_use]
    pub fn baryon(&self) -> f64 {
        self.baryon
    }

    /// Returns the value of a single parameter.
    #[must_use]
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Hubble => self.hubble,
            Parameter::Matter => self.matter,
            Parameter::Baryon => self.baryon,
        }
    }

    /// Returns a copy with one parameter replaced, validating the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the new combination is invalid.
    pub fn with(&self, parameter: Parameter, value: f64) -> Result<Self, ParameterError> {
        let next = self.with_unchecked(parameter, value);
        Self::new(next.hubble, next.matter, next.baryon)
    }

    /// Returns a copy with one parameter replaced, without validation.
    ///
    /// Axis sweeps use this so the simulation decides whether the perturbed
    /// combination is acceptable.
    #[must_use]
    pub(crate) fn with_unchecked(&self, parameter: Parameter, value: f64) -> Self {
        let mut next = *self;
        match parameter {
            Parameter::Hubble => next.hubble = value,
            Parameter::Matter => next.matter = value,
            Parameter::Baryon => next.baryon = value,
        }
        next
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={}, Ωₘ={}, Ω_b={}",
            self.hubble, self.matter, self.baryon
        )
    }
}

/// A parameter and the ordered values to substitute for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParameterAxis {
    parameter: Parameter,
    values: Vec<f64>,
}

impl ParameterAxis {
    /// Creates an axis over the given values.
    ///
    /// Each value must lie within the parameter's own range and values must be
    /// pairwise distinct. Whether a value is compatible with the rest of a
    /// baseline (for example `baryon <= matter`) is only known once the
    /// perturbed set is built during the sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, contains an out-of-range or
    /// non-finite value, or repeats a value.
    pub fn new(
        parameter: Parameter,
        values: impl IntoIterator<Item = f64>,
    ) -> Result<Self, ParameterError> {
        let values: Vec<f64> = values.into_iter().collect();

        if values.is_empty() {
            return Err(ParameterError::EmptyAxis { parameter });
        }

        for (i, &value) in values.iter().enumerate() {
            parameter.check(value)?;

            #[allow(clippy::float_cmp)]
            if values[..i].iter().any(|&seen| seen == value) {
                return Err(ParameterError::DuplicateAxisValue { parameter, value });
            }
        }

        Ok(Self { parameter, values })
    }

    /// Wraps values already known to form a valid axis.
    pub(crate) fn new_unchecked(parameter: Parameter, values: Vec<f64>) -> Self {
        Self { parameter, values }
    }

    #[must_use]
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns true if the axis includes the baseline's own value exactly.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn contains_baseline(&self, baseline: &ParameterSet) -> bool {
        let standard = baseline.get(self.parameter);
        self.values.iter().any(|&value| value == standard)
    }
}
