mod adadelta;
mod adagrad;
mod momentum;
mod nag;
mod rmsprop;
mod sgd;
mod update_rule;

pub use adadelta::Adadelta;
pub use adagrad::Adagrad;
pub use momentum::Momentum;
pub use nag::Nag;
pub use rmsprop::RmsProp;
pub use sgd::Sgd;
pub use update_rule::UpdateRule;
