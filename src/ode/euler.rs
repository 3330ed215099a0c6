use crate::ode::{Integrator, Model, ModelState, NullSettings};

pub type EulerSettings = NullSettings;

/// Explicit first order Euler. Every component of the next state is computed
/// from the derivative at the current state only.
pub struct Euler<M: Model>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  dxdt: M::State,
}

impl<M: Model> Integrator<M> for Euler<M>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  type Settings = EulerSettings;

  fn new(_: Self::Settings) -> Self {
    Self {
      dxdt: M::State::new(),
    }
  }

  fn step_internal(
    &mut self,
    model: &M,
    state: &mut M::State,
    step: usize,
    time_step: &M::S,
  ) {
    self.dxdt.zeros_as(state);

    model.derivative(state, &mut self.dxdt, step);

    for (state, dxdt) in state.into_iter().zip(self.dxdt.into_iter()) {
      *state += *dxdt * *time_step
    }
  }
}

#[cfg(test)]
impl ModelState<f64> for Vec<f64> {
  fn new() -> Self {
    Vec::new()
  }

  fn zeros_as(&mut self, other: &Self) {
    self.clear();
    self.resize(other.len(), 0.0);
  }
}

#[cfg(test)]
struct Decay {
  rate: f64,
}

#[cfg(test)]
impl Model for Decay {
  type S = f64;
  type State = Vec<f64>;

  fn derivative(&self, x: &Self::State, dxdt: &mut Self::State, _: usize) {
    for (x, dxdt) in x.iter().zip(dxdt.iter_mut()) {
      *dxdt = -self.rate * *x;
    }
  }
}

// dx/dt equals the index of the step being taken
#[cfg(test)]
struct StepRamp;

#[cfg(test)]
impl Model for StepRamp {
  type S = f64;
  type State = Vec<f64>;

  fn derivative(&self, _: &Self::State, dxdt: &mut Self::State, step: usize) {
    dxdt[0] = step as f64;
  }
}

#[cfg(test)]
use crate::assert_float_eq;
#[cfg(test)]
use proptest::prelude::*;

#[test]
fn decay_matches_closed_form() {
  let model = Decay { rate: 0.5 };
  let mut integrator: Euler<Decay> = Euler::new(EulerSettings {});
  let mut state = vec![1.0, 2.0];
  let mut step = 0;

  integrator.n_steps(&model, &mut state, &mut step, &0.1, 20);

  assert_eq!(step, 20);
  let factor = (1.0f64 - 0.5 * 0.1).powi(20);
  assert_float_eq!(state[0], factor);
  assert_float_eq!(state[1], 2.0 * factor);
}

#[test]
fn derivative_sees_step_index() {
  let mut integrator: Euler<StepRamp> = Euler::new(EulerSettings {});
  let states = integrator.trajectory(&StepRamp, &vec![0.0], &0.5, 5);

  assert_eq!(states.len(), 5);
  // x_k = dt * (0 + 1 + ... + (k - 1))
  for (k, state) in states.iter().enumerate() {
    let expected = 0.5 * (k * k.saturating_sub(1) / 2) as f64;
    assert_float_eq!(state[0], expected);
  }
}

#[test]
fn trajectory_single_point_is_initial() {
  let mut integrator: Euler<Decay> = Euler::new(EulerSettings {});
  let states =
    integrator.trajectory(&Decay { rate: 3.0 }, &vec![4.0], &0.1, 1);

  assert_eq!(states, vec![vec![4.0]]);
}

#[cfg(test)]
proptest! {
#[test]
fn single_step_is_forward_difference(
  rate in 0.0f64..10.0,
  x0 in -100.0f64..100.0,
  time_step in 0.0001f64..1.0,
) {
  let mut integrator: Euler<Decay> = Euler::new(EulerSettings {});
  let mut state = vec![x0];
  let mut step = 0;

  integrator.step(&Decay { rate }, &mut state, &mut step, &time_step);

  assert_eq!(step, 1);
  assert_float_eq!(state[0], x0 + (-rate * x0) * time_step);
}
}
