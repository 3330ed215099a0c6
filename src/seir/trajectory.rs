use crate::seir::{Compartment, SeirState};
use nalgebra::DMatrix;

/// States of a run, one per time grid point. Row 0 is the initial
/// condition.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
  rows: Vec<SeirState>,
}

impl Trajectory {
  pub fn from_rows(rows: Vec<SeirState>) -> Self {
    Self { rows }
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn rows(&self) -> &[SeirState] {
    &self.rows
  }

  pub fn row(&self, idx: usize) -> &SeirState {
    &self.rows[idx]
  }

  /// # Panics
  ///
  /// Panics if the trajectory is empty.
  pub fn final_state(&self) -> &SeirState {
    &self.rows[self.rows.len() - 1]
  }

  pub fn column(&self, compartment: Compartment) -> Vec<f64> {
    self.rows.iter().map(|row| row[compartment]).collect()
  }

  /// Row and value of the largest entry in `compartment`.
  pub fn peak(&self, compartment: Compartment) -> Option<(usize, f64)> {
    self
      .rows
      .iter()
      .map(|row| row[compartment])
      .enumerate()
      .fold(None, |best, (idx, value)| match best {
        Some((_, best_value)) if best_value >= value => best,
        _ => Some((idx, value)),
      })
  }

  /// Dense `len() x 4` matrix with columns `[S, E, I, R]`.
  pub fn to_matrix(&self) -> DMatrix<f64> {
    DMatrix::from_fn(self.rows.len(), Compartment::ALL.len(), |row, col| {
      self.rows[row].0[col]
    })
  }

  pub fn into_rows(self) -> Vec<SeirState> {
    self.rows
  }
}

#[cfg(test)]
fn sample() -> Trajectory {
  Trajectory::from_rows(vec![
    SeirState::new(0.9, 0.1, 0.0, 0.0),
    SeirState::new(0.8, 0.1, 0.1, 0.0),
    SeirState::new(0.7, 0.05, 0.15, 0.1),
    SeirState::new(0.65, 0.05, 0.1, 0.2),
  ])
}

#[test]
fn matrix_has_compartment_columns() {
  let matrix = sample().to_matrix();

  assert_eq!(matrix.nrows(), 4);
  assert_eq!(matrix.ncols(), 4);
  assert_eq!(matrix[(0, 0)], 0.9);
  assert_eq!(matrix[(2, 2)], 0.15);
  assert_eq!(matrix[(3, 3)], 0.2);
}

#[test]
fn columns_and_peaks() {
  let trajectory = sample();

  assert_eq!(
    trajectory.column(Compartment::Infected),
    vec![0.0, 0.1, 0.15, 0.1]
  );
  assert_eq!(trajectory.peak(Compartment::Infected), Some((2, 0.15)));
  assert_eq!(trajectory.peak(Compartment::Susceptible), Some((0, 0.9)));
  assert_eq!(trajectory.final_state().r(), 0.2);
  let empty = Trajectory::from_rows(Vec::new());
  assert_eq!(empty.peak(Compartment::Exposed), None);
}

#[test]
#[should_panic]
fn empty_trajectory_has_no_final_state() {
  Trajectory::from_rows(Vec::new()).final_state();
}
