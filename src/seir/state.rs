use crate::ode::ModelState;
use nalgebra::base::iter::{MatrixIter, MatrixIterMut};
use nalgebra::dimension::{U1, U4};
use nalgebra::storage::Owned;
use nalgebra::Vector4;
use std::fmt;
use std::ops::Index;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compartment {
  Susceptible,
  Exposed,
  Infected,
  Recovered,
}

impl Compartment {
  /// Column order of a trajectory.
  pub const ALL: [Compartment; 4] = [
    Compartment::Susceptible,
    Compartment::Exposed,
    Compartment::Infected,
    Compartment::Recovered,
  ];

  pub fn index(self) -> usize {
    match self {
      Compartment::Susceptible => 0,
      Compartment::Exposed => 1,
      Compartment::Infected => 2,
      Compartment::Recovered => 3,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      Compartment::Susceptible => "S",
      Compartment::Exposed => "E",
      Compartment::Infected => "I",
      Compartment::Recovered => "R",
    }
  }
}

impl fmt::Display for Compartment {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match self {
      Compartment::Susceptible => "Susceptible",
      Compartment::Exposed => "Exposed",
      Compartment::Infected => "Infected",
      Compartment::Recovered => "Recovered",
    };
    f.write_str(name)
  }
}

/// Population in each compartment, stored as `[S, E, I, R]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeirState(pub Vector4<f64>);

impl SeirState {
  pub fn new(s: f64, e: f64, i: f64, r: f64) -> Self {
    SeirState(Vector4::new(s, e, i, r))
  }

  pub fn s(&self) -> f64 {
    self.0[0]
  }

  pub fn e(&self) -> f64 {
    self.0[1]
  }

  pub fn i(&self) -> f64 {
    self.0[2]
  }

  pub fn r(&self) -> f64 {
    self.0[3]
  }

  /// Total population, conserved by every step.
  pub fn total(&self) -> f64 {
    self.0.iter().sum()
  }

  pub fn to_array(&self) -> [f64; 4] {
    [self.s(), self.e(), self.i(), self.r()]
  }
}

impl Index<Compartment> for SeirState {
  type Output = f64;

  fn index(&self, compartment: Compartment) -> &f64 {
    &self.0[compartment.index()]
  }
}

impl From<[f64; 4]> for SeirState {
  fn from([s, e, i, r]: [f64; 4]) -> Self {
    SeirState::new(s, e, i, r)
  }
}

impl<'a> IntoIterator for &'a SeirState {
  type Item = &'a f64;

  type IntoIter = MatrixIter<'a, f64, U4, U1, Owned<f64, U4, U1>>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

impl<'a> IntoIterator for &'a mut SeirState {
  type Item = &'a mut f64;

  type IntoIter = MatrixIterMut<'a, f64, U4, U1, Owned<f64, U4, U1>>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.0.iter_mut()
  }
}

impl ModelState<f64> for SeirState {
  fn new() -> Self {
    SeirState(Vector4::zeros())
  }

  fn zeros_as(&mut self, _: &Self) {
    self.0 = Vector4::zeros();
  }
}

#[test]
fn accessors_follow_column_order() {
  let state = SeirState::new(0.5, 0.25, 0.125, 0.0625);

  assert_eq!(state.to_array(), [0.5, 0.25, 0.125, 0.0625]);
  for compartment in Compartment::ALL.iter() {
    assert_eq!(state[*compartment], state.0[compartment.index()]);
  }
  assert_eq!(state.total(), 0.9375);
}

#[test]
fn iterates_in_place() {
  let mut state = SeirState::from([1.0, 2.0, 3.0, 4.0]);

  for value in &mut state {
    *value *= 2.0;
  }

  let values: Vec<f64> = (&state).into_iter().cloned().collect();
  assert_eq!(values, vec![2.0, 4.0, 6.0, 8.0]);
}
