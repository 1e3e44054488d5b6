use ndarray::ArrayD;

use crate::parameters::ParamId;

/// Names the auxiliary state slot an update pair targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccumKind {
    /// Carried velocity (Momentum, Nag).
    Velocity,
    /// Running average of squared gradients (RmsProp, Adadelta).
    SqAvg,
    /// Cumulative sum of squared gradients (Adagrad).
    SqSum,
    /// Running average of squared parameter deltas (Adadelta).
    DeltaAvg,
}

/// The state location an update pair writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTarget {
    /// The parameter value itself.
    Param(ParamId),
    /// One of the rule-owned accumulators attached to a parameter.
    Accum(ParamId, AccumKind),
}

/// One (state location, new value) assignment of a step plan.
#[derive(Debug, Clone)]
pub struct UpdatePair {
    pub target: UpdateTarget,
    pub value: ArrayD<f32>,
}

impl UpdatePair {
    pub(crate) fn param(id: ParamId, value: ArrayD<f32>) -> Self {
        Self {
            target: UpdateTarget::Param(id),
            value,
        }
    }

    pub(crate) fn accum(id: ParamId, kind: AccumKind, value: ArrayD<f32>) -> Self {
        Self {
            target: UpdateTarget::Accum(id, kind),
            value,
        }
    }
}

/// The ordered assignment list produced for one training step.
///
/// Every value is computed from pre-step state, so an executor may apply the
/// pairs in any order as long as the whole step lands atomically.
pub type UpdatePlan = Vec<UpdatePair>;
