pub mod clip;
pub mod error;
pub mod gradients;
pub mod loss;
pub mod optimization;
pub mod parameters;
pub mod plan;
pub mod regularizer;
pub mod specs;

pub use error::{OptimErr, Result};
pub use gradients::GradientSource;
pub use optimization::{Adadelta, Adagrad, Momentum, Nag, RmsProp, Sgd, UpdateRule};
pub use parameters::{ParamId, Parameter, Parameters};
pub use plan::{AccumKind, UpdatePair, UpdatePlan, UpdateTarget};
pub use regularizer::Regularizer;
pub use specs::{RegularizerSpec, RuleBuilder, RuleSpec, UpdateSpec};
