//! Physical constants of the double pendulum.

use core::fmt;

use crate::error::{PendulumError, Result};

/// The four adjustable physical constants plus gravity.
///
/// Values are in a consistent but otherwise unspecified unit system.
/// Masses and rod lengths are positive; gravity is any finite number and is
/// normally non-negative.
///
/// # Example
///
/// ```rust
/// use pendulum::Parameters;
///
/// let params = Parameters::default();
/// assert_eq!(params.l1, 1.5);
/// assert_eq!(params.g, 9.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Parameters {
    /// Mass of the first bob.
    pub m1: f64,
    /// Mass of the second bob.
    pub m2: f64,
    /// Length of the first rod (pivot to first bob).
    pub l1: f64,
    /// Length of the second rod (first bob to second bob).
    pub l2: f64,
    /// Gravitational acceleration.
    pub g: f64,
}

impl Parameters {
    /// The values restored by a reset.
    pub const DEFAULT: Self = Self {
        m1: 1.0,
        m2: 1.0,
        l1: 1.5,
        l2: 1.5,
        g: 9.8,
    };

    /// Creates parameters without validation.
    #[inline]
    pub const fn new(m1: f64, m2: f64, l1: f64, l2: f64, g: f64) -> Self {
        Self { m1, m2, l1, l2, g }
    }

    /// Returns the value of one parameter.
    #[inline]
    pub const fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Mass1 => self.m1,
            Parameter::Mass2 => self.m2,
            Parameter::Length1 => self.l1,
            Parameter::Length2 => self.l2,
            Parameter::Gravity => self.g,
        }
    }

    /// Validates `value` for `parameter` and writes it.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] and leaves `self`
    /// untouched if the value is rejected by [`Parameter::validate`].
    pub fn set(&mut self, parameter: Parameter, value: f64) -> Result<()> {
        parameter.validate(value)?;
        match parameter {
            Parameter::Mass1 => self.m1 = value,
            Parameter::Mass2 => self.m2 = value,
            Parameter::Length1 => self.l1 = value,
            Parameter::Length2 => self.l2 = value,
            Parameter::Gravity => self.g = value,
        }
        Ok(())
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`PendulumError::InvalidParameter`] found, in
    /// [`Parameter::ALL`] order.
    pub fn validate(&self) -> Result<()> {
        for parameter in Parameter::ALL {
            parameter.validate(self.get(parameter))?;
        }
        Ok(())
    }

    /// Combined mass `m1 + m2`.
    #[inline]
    pub fn total_mass(&self) -> f64 {
        self.m1 + self.m2
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Names one field of [`Parameters`].
///
/// Used by the generic setter and in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parameter {
    /// First bob mass.
    #[cfg_attr(feature = "serde", serde(rename = "m1"))]
    Mass1,
    /// Second bob mass.
    #[cfg_attr(feature = "serde", serde(rename = "m2"))]
    Mass2,
    /// First rod length.
    #[cfg_attr(feature = "serde", serde(rename = "l1"))]
    Length1,
    /// Second rod length.
    #[cfg_attr(feature = "serde", serde(rename = "l2"))]
    Length2,
    /// Gravitational acceleration.
    #[cfg_attr(feature = "serde", serde(rename = "g"))]
    Gravity,
}

impl Parameter {
    /// Every parameter, in the order a reset re-applies them.
    pub const ALL: [Parameter; 5] = [
        Parameter::Mass1,
        Parameter::Mass2,
        Parameter::Length1,
        Parameter::Length2,
        Parameter::Gravity,
    ];

    /// Short symbol, as used in configuration files.
    pub const fn symbol(self) -> &'static str {
        match self {
            Parameter::Mass1 => "m1",
            Parameter::Mass2 => "m2",
            Parameter::Length1 => "l1",
            Parameter::Length2 => "l2",
            Parameter::Gravity => "g",
        }
    }

    /// Checks a candidate value.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for non-finite values, and
    /// for masses or lengths that are not strictly positive.
    pub fn validate(self, value: f64) -> Result<()> {
        let reason = if !value.is_finite() {
            Some("must be finite")
        } else if self != Parameter::Gravity && value <= 0.0 {
            Some("must be positive")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(PendulumError::InvalidParameter {
                parameter: self,
                value,
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Parameters::default();
        assert_eq!(p, Parameters::new(1.0, 1.0, 1.5, 1.5, 9.8));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_set_and_get() {
        let mut p = Parameters::default();
        p.set(Parameter::Length2, 0.75).unwrap();
        assert_eq!(p.l2, 0.75);
        assert_eq!(p.get(Parameter::Length2), 0.75);
    }

    #[test]
    fn test_rejected_value_leaves_params_untouched() {
        let mut p = Parameters::default();
        let err = p.set(Parameter::Mass1, f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            PendulumError::InvalidParameter {
                parameter: Parameter::Mass1,
                ..
            }
        ));
        assert_eq!(p, Parameters::default());
    }

    #[test]
    fn test_non_positive_mass_and_length_rejected() {
        assert!(Parameter::Mass2.validate(0.0).is_err());
        assert!(Parameter::Length1.validate(-1.0).is_err());
        assert!(Parameter::Length1.validate(f64::INFINITY).is_err());
    }

    #[test]
    fn test_gravity_accepts_zero_and_negative() {
        assert!(Parameter::Gravity.validate(0.0).is_ok());
        assert!(Parameter::Gravity.validate(-3.0).is_ok());
        assert!(Parameter::Gravity.validate(f64::NAN).is_err());
    }

    #[test]
    fn test_symbols() {
        let symbols: Vec<&str> = Parameter::ALL.iter().map(|p| p.symbol()).collect();
        assert_eq!(symbols, ["m1", "m2", "l1", "l2", "g"]);
        assert_eq!(Parameter::Gravity.to_string(), "g");
    }
}
