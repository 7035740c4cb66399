use std::fmt;

use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::super::stages::CaptureStage;

/// A room dimension, used to report which one was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Length,
    Width,
    Height,
    /// The product of all three.
    Volume,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Length => "length",
            Self::Width => "width",
            Self::Height => "height",
            Self::Volume => "volume",
        })
    }
}

/// Errors raised while assembling a [`ParameterSet`](super::ParameterSet).
///
/// Each variant names the input that failed and carries the violated bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// A room dimension or the room volume is not finite and strictly positive.
    #[error("invalid room {dimension}")]
    InvalidGeometry {
        dimension: Dimension,
        #[source]
        source: ConstraintError,
    },

    #[error("invalid power per rack")]
    InvalidRackPower(#[source] ConstraintError),

    /// Racks must be laid out in at least one row.
    #[error("invalid rack row count")]
    InvalidRackRows(#[source] ConstraintError),

    /// A capture fraction lies outside [0, 1].
    #[error("invalid {stage} effectiveness")]
    InvalidEffectiveness {
        stage: CaptureStage,
        #[source]
        source: ConstraintError,
    },

    #[error("invalid heat exchanger capacity")]
    InvalidHeatExchangerCapacity(#[source] ConstraintError),

    #[error("invalid airflow per air handler")]
    InvalidAirflow(#[source] ConstraintError),

    #[error("invalid temperature")]
    InvalidTemperature(#[source] ConstraintError),

    /// A temperature grid needs at least one cell along each axis.
    #[error("invalid grid resolution")]
    InvalidResolution(#[source] ConstraintError),
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::error::Error as _;

    #[test]
    fn messages_name_the_input() {
        let err = ParameterError::InvalidGeometry {
            dimension: Dimension::Width,
            source: ConstraintError::Zero,
        };
        assert_eq!(err.to_string(), "invalid room width");
        assert_eq!(
            err.source().map(ToString::to_string),
            Some("value must not be zero".to_string())
        );

        let err = ParameterError::InvalidEffectiveness {
            stage: CaptureStage::Rdhx,
            source: ConstraintError::AboveMaximum,
        };
        assert_eq!(err.to_string(), "invalid RDHX effectiveness");
    }
}
