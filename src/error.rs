use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("malformed schedule entry `{entry}`, expected `step:value`")]
  MalformedEntry { entry: String },

  #[error("schedule has no entries")]
  EmptySchedule,

  #[error("schedule steps must increase (step {step} follows {previous})")]
  UnorderedSchedule { previous: usize, step: usize },

  #[error("invalid time grid (t_max={t_max}, dt={dt})")]
  InvalidGrid { t_max: f64, dt: f64 },

  #[error(transparent)]
  Io(#[from] io::Error),
}
