pub mod coefficient;
pub mod model;
pub mod schedule;
pub mod state;
pub mod sweep;
pub mod trajectory;

pub use coefficient::Coefficient;
pub use model::Seir;
pub use schedule::Schedule;
pub use state::{Compartment, SeirState};
pub use trajectory::Trajectory;
