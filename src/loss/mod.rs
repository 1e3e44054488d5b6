mod bce;
mod cce;
mod loss_fn;
mod mae;
mod mse;

pub use bce::Bce;
pub use cce::Cce;
pub use loss_fn::LossFn;
pub use mae::Mae;
pub use mse::Mse;
