use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire update engine.
pub type Result<T> = std::result::Result<T, OptimErr>;

/// The update engine's error type.
#[derive(Debug)]
pub enum OptimErr {
    /// The gradient list is not aligned with the parameter arena.
    GradientCountMismatch { got: usize, expected: usize },

    /// A rule spec carries an epsilon that cannot guard a division.
    NonPositiveEpsilon { got: f32 },
}

impl Display for OptimErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptimErr::GradientCountMismatch { got, expected } => format!(
                "gradient count mismatch: got {got} gradients for {expected} parameters"
            ),
            OptimErr::NonPositiveEpsilon { got } => {
                format!("epsilon must be strictly positive, got {got}")
            }
        };

        write!(f, "{s}")
    }
}

impl Error for OptimErr {}
