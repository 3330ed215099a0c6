use crate::ode::Model;

pub trait Integrator<M: Model>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  type Settings: Clone;

  fn new(settings: Self::Settings) -> Self;

  fn step_internal(
    &mut self,
    model: &M,
    state: &mut M::State,
    step: usize,
    time_step: &M::S,
  );

  fn step(
    &mut self,
    model: &M,
    state: &mut M::State,
    step: &mut usize,
    time_step: &M::S,
  ) {
    self.step_internal(model, state, *step, time_step);

    *step += 1;
  }

  fn n_steps(
    &mut self,
    model: &M,
    state: &mut M::State,
    step: &mut usize,
    time_step: &M::S,
    steps: usize,
  ) {
    for _ in 0..steps {
      self.step(model, state, step, time_step);
    }
  }

  /// Runs `points - 1` steps from `initial` (step index 0) and records every
  /// state, including the initial one.
  fn trajectory(
    &mut self,
    model: &M,
    initial: &M::State,
    time_step: &M::S,
    points: usize,
  ) -> Vec<M::State> {
    let mut states = Vec::with_capacity(points);
    let mut state = initial.clone();
    let mut step = 0;

    states.push(state.clone());
    while states.len() < points {
      self.step(model, &mut state, &mut step, time_step);
      states.push(state.clone());
    }

    states
  }
}
