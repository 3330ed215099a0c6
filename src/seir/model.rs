use crate::ode::{Euler, EulerSettings, Integrator, Model};
use crate::seir::{Coefficient, SeirState, Trajectory};

/// SEIR compartmental model integrated with forward Euler:
///
/// ```text
/// dS/dt = -ρ β S I
/// dE/dt =  ρ β S I - α E
/// dI/dt =  α E - γ I
/// dR/dt =  γ I
/// ```
///
/// β is the contact rate, α the inverse incubation period, γ the inverse
/// infectious period and ρ a social distancing factor (1 is no distancing,
/// 0 is complete lockdown). Rates and initial values are not validated.
#[derive(Clone, Debug)]
pub struct Seir {
  beta: Coefficient,
  alpha: Coefficient,
  gamma: Coefficient,
  rho: Coefficient,
  initial: SeirState,
}

impl Seir {
  pub fn new(
    beta: impl Into<Coefficient>,
    alpha: impl Into<Coefficient>,
    gamma: impl Into<Coefficient>,
    s0: f64,
    e0: f64,
    i0: f64,
    r0: f64,
  ) -> Self {
    Self {
      beta: beta.into(),
      alpha: alpha.into(),
      gamma: gamma.into(),
      rho: Coefficient::Constant(1.0),
      initial: SeirState::new(s0, e0, i0, r0),
    }
  }

  pub fn with_distancing(mut self, rho: impl Into<Coefficient>) -> Self {
    self.rho = rho.into();
    self
  }

  pub fn beta(&self) -> &Coefficient {
    &self.beta
  }

  pub fn alpha(&self) -> &Coefficient {
    &self.alpha
  }

  pub fn gamma(&self) -> &Coefficient {
    &self.gamma
  }

  pub fn rho(&self) -> &Coefficient {
    &self.rho
  }

  pub fn initial_state(&self) -> SeirState {
    self.initial
  }

  /// Integrates over `time`, one row per grid point.
  ///
  /// The step is taken from the first interval only, so `time` must be
  /// uniform. Rates are evaluated at the step index `k` when advancing from
  /// `time[k]`, never at `time[k]` itself.
  ///
  /// # Panics
  ///
  /// Panics if `time` has fewer than two points.
  pub fn trajectory(&self, time: &[f64]) -> Trajectory {
    let time_step = time[1] - time[0];

    let mut integrator: Euler<Self> = Euler::new(EulerSettings {});

    Trajectory::from_rows(integrator.trajectory(
      self,
      &self.initial,
      &time_step,
      time.len(),
    ))
  }
}

impl Model for Seir {
  type S = f64;
  type State = SeirState;

  fn derivative(&self, x: &Self::State, dxdt: &mut Self::State, step: usize) {
    let rho = self.rho.eval(step);
    let beta = self.beta.eval(step);
    let alpha = self.alpha.eval(step);
    let gamma = self.gamma.eval(step);

    let infection = rho * beta * x.s() * x.i();
    let onset = alpha * x.e();
    let recovery = gamma * x.i();

    *dxdt = SeirState::new(
      -infection,
      infection - onset,
      onset - recovery,
      recovery,
    );
  }
}

#[cfg(test)]
use crate::assert_float_eq;
#[cfg(test)]
use crate::seir::Compartment;
#[cfg(test)]
use crate::time_grid;
#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;

#[cfg(test)]
fn covid() -> Seir {
  Seir::new(1.75, 0.2, 0.5, 0.9999, 0.0001, 0.0, 0.0)
}

#[cfg(test)]
fn grid() -> Vec<f64> {
  time_grid::uniform(100.0, 0.1).unwrap()
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, Arbitrary)]
enum RateShape {
  Constant,
  Closure,
  StepDown,
}

#[cfg(test)]
impl RateShape {
  fn coefficient(self, value: f64) -> Coefficient {
    match self {
      RateShape::Constant => value.into(),
      RateShape::Closure => Coefficient::time_varying(move |_| value),
      RateShape::StepDown => Coefficient::time_varying(move |step| {
        if step < 200 {
          value
        } else {
          value * 0.5
        }
      }),
    }
  }
}

#[test]
fn covid_scenario() {
  let time = grid();
  let trajectory = covid().trajectory(&time);

  assert_eq!(trajectory.len(), 1001);
  assert!(trajectory.final_state().r() > 0.0);
  for row in trajectory.rows() {
    assert_float_eq!(row.total(), 1.0, 1e-9);
  }
}

#[test]
fn first_row_is_initial_condition() {
  let model = Seir::new(1.75, 0.2, 0.5, 0.7, 0.1, 0.15, 0.05);
  let trajectory = model.trajectory(&grid());

  assert_eq!(trajectory.row(0), &SeirState::new(0.7, 0.1, 0.15, 0.05));
}

#[test]
fn matches_hand_computed_first_step() {
  let model = Seir::new(2.0, 0.25, 0.5, 0.8, 0.1, 0.1, 0.0);
  let trajectory = model.trajectory(&[0.0, 0.5]);

  let (s, e, i, dt) = (0.8, 0.1, 0.1, 0.5);
  let next = trajectory.row(1);
  assert_float_eq!(next.s(), s - 2.0 * s * i * dt);
  assert_float_eq!(next.e(), e + (2.0 * s * i - 0.25 * e) * dt);
  assert_float_eq!(next.i(), i + (0.25 * e - 0.5 * i) * dt);
  assert_float_eq!(next.r(), 0.5 * i * dt);
}

#[test]
fn susceptible_falls_and_recovered_rises() {
  let model = Seir::new(1.75, 0.2, 0.5, 0.99, 0.0, 0.01, 0.0);
  let trajectory = model.trajectory(&grid());

  let s = trajectory.column(Compartment::Susceptible);
  let r = trajectory.column(Compartment::Recovered);
  for pair in s.windows(2) {
    assert!(pair[1] <= pair[0]);
  }
  for pair in r.windows(2) {
    assert!(pair[1] >= pair[0]);
  }
}

#[test]
fn constant_rate_equals_constant_function() {
  let time = grid();
  let scalar = covid().trajectory(&time);
  let function = Seir::new(
    Coefficient::time_varying(|_| 1.75),
    0.2,
    Coefficient::time_varying(|_| 0.5),
    0.9999,
    0.0001,
    0.0,
    0.0,
  )
  .trajectory(&time);

  assert_eq!(scalar, function);
}

#[test]
fn no_distancing_is_rho_one() {
  let time = grid();

  assert_eq!(
    covid().trajectory(&time),
    covid().with_distancing(1.0).trajectory(&time)
  );
}

#[test]
fn full_lockdown_stops_transmission() {
  let time = grid();

  let trajectory = covid().with_distancing(0.0).trajectory(&time);
  for row in trajectory.rows() {
    assert_eq!(row.s(), 0.9999);
    assert_float_eq!(row.total(), 1.0);
  }

  let susceptible_only = Seir::new(1.75, 0.2, 0.5, 0.6, 0.0, 0.0, 0.4)
    .with_distancing(0.0)
    .trajectory(&time);
  for row in susceptible_only.rows() {
    assert_eq!(row, susceptible_only.row(0));
  }
}

#[test]
fn no_exposure_means_no_outbreak() {
  let trajectory =
    Seir::new(1.75, 0.2, 0.5, 0.9, 0.0, 0.0, 0.1).trajectory(&grid());

  for row in trajectory.rows() {
    assert_eq!(row, &SeirState::new(0.9, 0.0, 0.0, 0.1));
  }
}

#[test]
fn rates_are_indexed_by_step() {
  // switched off at step 30, which is t = 3.0 on this grid
  let beta =
    Coefficient::time_varying(|step| if step < 30 { 1.75 } else { 0.0 });
  let model = Seir::new(beta, 0.2, 0.5, 0.9, 0.05, 0.05, 0.0);
  let trajectory = model.trajectory(&grid());

  let s = trajectory.column(Compartment::Susceptible);
  assert!(s[30] < s[29]);
  for k in 31..s.len() {
    assert_eq!(s[k], s[30]);
  }
}

#[test]
fn nonuniform_grid_uses_first_interval() {
  assert_eq!(
    covid().trajectory(&[0.0, 0.1, 5.0, 90.0]),
    covid().trajectory(&[0.0, 0.1, 0.2, 0.3])
  );
}

#[test]
fn rerunning_starts_from_initial_condition() {
  let model = covid();
  let time = grid();

  assert_eq!(model.trajectory(&time), model.trajectory(&time));
}

#[test]
fn large_step_is_not_corrected() {
  let model = Seir::new(50.0, 20.0, 30.0, 0.5, 0.25, 0.25, 0.0);
  let trajectory = model.trajectory(&[0.0, 1.0, 2.0, 3.0]);

  assert_eq!(trajectory.len(), 4);
  assert!(trajectory.row(1).s() < 0.0);
}

#[test]
#[should_panic]
fn single_point_grid_panics() {
  covid().trajectory(&[0.0]);
}

#[cfg(test)]
proptest! {
#[test]
fn population_is_conserved(
  beta in 0.0f64..3.0,
  alpha in 0.01f64..1.0,
  gamma in 0.01f64..1.0,
  rho in 0.0f64..1.0,
  beta_shape: RateShape,
  rho_shape: RateShape,
  infected in 0.0f64..0.1,
  exposed in 0.0f64..0.1,
) {
  let s0 = 1.0 - infected - exposed;
  let beta = beta_shape.coefficient(beta);
  let model = Seir::new(beta, alpha, gamma, s0, exposed, infected, 0.0)
    .with_distancing(rho_shape.coefficient(rho));
  let trajectory = model.trajectory(&time_grid::uniform(50.0, 0.1).unwrap());

  for row in trajectory.rows() {
    assert_float_eq!(row.total(), 1.0, 1e-9);
  }
}

#[test]
fn recovered_never_decreases(
  beta in 0.0f64..3.0,
  alpha in 0.01f64..1.0,
  gamma in 0.01f64..1.0,
  infected in 0.0001f64..0.1,
) {
  let model = Seir::new(beta, alpha, gamma, 1.0 - infected, 0.0, infected, 0.0);
  let r = model
    .trajectory(&time_grid::uniform(50.0, 0.1).unwrap())
    .column(Compartment::Recovered);

  for pair in r.windows(2) {
    assert!(pair[1] >= pair[0]);
  }
}
}
