pub mod euler;
pub mod integrator;
pub mod model;
pub mod null_settings;

pub use euler::{Euler, EulerSettings};
pub use integrator::Integrator;
pub use model::{Model, ModelState};
pub use null_settings::NullSettings;
