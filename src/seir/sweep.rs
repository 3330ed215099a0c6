use crate::seir::{Coefficient, Seir, Trajectory};
use rayon::prelude::*;
use tracing::debug;

/// Runs independent models over the same grid in parallel. Results keep the
/// order of `models`; `on_finish` is called once per completed run.
pub fn run_all<F>(
  models: &[Seir],
  time: &[f64],
  on_finish: F,
) -> Vec<Trajectory>
where
  F: Fn() + Sync,
{
  models
    .par_iter()
    .enumerate()
    .map(|(idx, model)| {
      let trajectory = model.trajectory(time);
      debug!(
        run = idx,
        rho = %model.rho(),
        final_recovered = trajectory.final_state().r(),
        "run finished"
      );
      on_finish();
      trajectory
    })
    .collect()
}

pub fn sweep_distancing(
  model: &Seir,
  rhos: &[Coefficient],
  time: &[f64],
) -> Vec<Trajectory> {
  let models: Vec<Seir> = rhos
    .iter()
    .map(|rho| model.clone().with_distancing(rho.clone()))
    .collect();

  run_all(&models, time, || {})
}

#[cfg(test)]
use crate::time_grid;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn sweep_matches_individual_runs() {
  let model = Seir::new(1.75, 0.2, 0.5, 0.9999, 0.0001, 0.0, 0.0);
  let time = time_grid::uniform(100.0, 0.1).unwrap();
  let rhos: Vec<Coefficient> =
    vec![1.0.into(), 0.8.into(), 0.5.into(), 0.0.into()];

  let runs = sweep_distancing(&model, &rhos, &time);

  assert_eq!(runs.len(), rhos.len());
  for (run, rho) in runs.iter().zip(&rhos) {
    let single = model.clone().with_distancing(rho.clone()).trajectory(&time);
    assert_eq!(run, &single);
  }

  // stronger distancing leaves more people susceptible
  let final_s: Vec<f64> =
    runs.iter().map(|run| run.final_state().s()).collect();
  for pair in final_s.windows(2) {
    assert!(pair[1] > pair[0]);
  }
}

#[test]
fn counts_finished_runs() {
  let finished = AtomicUsize::new(0);
  let models: Vec<Seir> = (0..8)
    .map(|k| {
      let beta = 0.5 + k as f64 * 0.25;
      Seir::new(beta, 0.2, 0.5, 0.99, 0.01, 0.0, 0.0)
    })
    .collect();

  let runs = run_all(&models, &[0.0, 0.1, 0.2], || {
    finished.fetch_add(1, Ordering::SeqCst);
  });

  assert_eq!(runs.len(), 8);
  assert_eq!(finished.load(Ordering::SeqCst), 8);
}
