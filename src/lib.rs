pub mod error;
pub mod ode;
pub mod report;
pub mod seir;
pub mod time_grid;
pub mod utils;

pub use error::{Error, Result};
pub use seir::{
  Coefficient, Compartment, Schedule, Seir, SeirState, Trajectory,
};
