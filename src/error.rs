// Simulation errors: bad construction parameters, runaway rallies, output failures

use thiserror::Error;

/// Simulation Errors
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error("Rally aborted after {shots} shots without a decision")]
    RallyAborted { shots: u32 },
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        SimError::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

/// Rejects negative or non-finite values; zero is allowed
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value))
    }
}

/// Rejects zero, negative or non-finite values
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_checks() {
        assert!(check_non_negative("reach", 0.0).is_ok());
        assert!(check_non_negative("reach", 2.5).is_ok());
        assert!(check_non_negative("reach", -0.1).is_err());
        assert!(check_non_negative("reach", f64::NAN).is_err());
        assert!(check_positive("width", 0.0).is_err());
        assert!(check_positive("width", f64::INFINITY).is_err());
        assert!(check_positive("width", 20.0).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = SimError::invalid("grid_size", 0);
        assert_eq!(err.to_string(), "Invalid parameter grid_size: 0");
        let err = SimError::RallyAborted { shots: 12 };
        assert_eq!(
            err.to_string(),
            "Rally aborted after 12 shots without a decision"
        );
    }
}
