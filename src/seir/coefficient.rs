use crate::seir::Schedule;
use crate::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub type RateFn = dyn Fn(usize) -> f64 + Send + Sync;

/// A model rate evaluated once per step.
///
/// The argument of a time-varying rate is the integer step index, not the
/// time value of the grid point. With `dt = 0.1`, a change meant for day 30
/// has to be placed at step 300.
#[derive(Clone)]
pub enum Coefficient {
  Constant(f64),
  TimeVarying(Arc<RateFn>),
}

impl Coefficient {
  pub fn time_varying<F>(rate: F) -> Self
  where
    F: Fn(usize) -> f64 + Send + Sync + 'static,
  {
    Coefficient::TimeVarying(Arc::new(rate))
  }

  #[inline]
  pub fn eval(&self, step: usize) -> f64 {
    match self {
      Coefficient::Constant(value) => *value,
      Coefficient::TimeVarying(rate) => rate(step),
    }
  }

  pub fn as_constant(&self) -> Option<f64> {
    match self {
      Coefficient::Constant(value) => Some(*value),
      Coefficient::TimeVarying(_) => None,
    }
  }
}

impl From<f64> for Coefficient {
  fn from(value: f64) -> Self {
    Coefficient::Constant(value)
  }
}

impl From<Schedule> for Coefficient {
  fn from(schedule: Schedule) -> Self {
    Coefficient::time_varying(move |step| schedule.eval(step))
  }
}

impl fmt::Debug for Coefficient {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Coefficient::Constant(value) => {
        f.debug_tuple("Constant").field(value).finish()
      }
      Coefficient::TimeVarying(_) => f.write_str("TimeVarying(..)"),
    }
  }
}

impl fmt::Display for Coefficient {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Coefficient::Constant(value) => write!(f, "{}", value),
      Coefficient::TimeVarying(_) => f.write_str("f(step)"),
    }
  }
}

/// `1.75` is a constant, `@path` loads a schedule file and anything else is
/// read as an inline schedule such as `0:1.75,300:0.5`.
impl FromStr for Coefficient {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    let s = s.trim();
    if let Ok(value) = s.parse::<f64>() {
      return Ok(Coefficient::Constant(value));
    }

    let schedule = if s.starts_with('@') {
      Schedule::load(Path::new(&s[1..]))?
    } else {
      s.parse::<Schedule>()?
    };

    Ok(schedule.into())
  }
}

#[test]
fn constant_ignores_step() {
  let beta = Coefficient::from(1.75);

  assert_eq!(beta.eval(0), 1.75);
  assert_eq!(beta.eval(10_000), 1.75);
  assert_eq!(beta.as_constant(), Some(1.75));
}

#[test]
fn time_varying_receives_step() {
  let rho =
    Coefficient::time_varying(|step| if step < 300 { 1.0 } else { 0.4 });

  assert_eq!(rho.eval(299), 1.0);
  assert_eq!(rho.eval(300), 0.4);
  assert_eq!(rho.as_constant(), None);
}

#[test]
fn parses_constant_and_inline_schedule() {
  let constant: Coefficient = " 0.2 ".parse().unwrap();
  assert_eq!(constant.as_constant(), Some(0.2));

  let scheduled: Coefficient = "0:1.75,300:0.5".parse().unwrap();
  assert_eq!(scheduled.as_constant(), None);
  assert_eq!(scheduled.eval(0), 1.75);
  assert_eq!(scheduled.eval(301), 0.5);

  assert!("fast".parse::<Coefficient>().is_err());
}

#[test]
fn missing_schedule_file_is_io_error() {
  match "@/nonexistent/beta.schedule".parse::<Coefficient>() {
    Err(Error::Io(_)) => {}
    other => panic!("expected io error, got {:?}", other),
  }
}
