use crate::{Error, Result};

/// Largest number of intervals `uniform` will allocate.
pub const MAX_INTERVALS: usize = 100_000_000;

/// `floor(t_max / dt) + 1` evenly spaced points from 0 to `t_max`, both
/// ends included.
///
/// The ratio is floored with a `1e-9` slack, so `uniform(0.3, 0.1)` gives
/// 4 points where a plain `int(0.3 / 0.1) + 1` gives 3. Grids with more than
/// `MAX_INTERVALS` intervals are rejected.
pub fn uniform(t_max: f64, dt: f64) -> Result<Vec<f64>> {
  let valid = |v: f64| v.is_finite() && v > 0.0;
  if !valid(t_max) || !valid(dt) {
    return Err(Error::InvalidGrid { t_max, dt });
  }

  // absorbs ratios such as 0.3 / 0.1 = 2.9999999999999996
  let ratio = (t_max / dt + 1e-9).floor();
  if !(ratio <= MAX_INTERVALS as f64) {
    return Err(Error::InvalidGrid { t_max, dt });
  }

  let intervals = ratio as usize;
  if intervals == 0 {
    return Err(Error::InvalidGrid { t_max, dt });
  }

  Ok(
    (0..=intervals)
      .map(|k| t_max * k as f64 / intervals as f64)
      .collect(),
  )
}

#[cfg(test)]
use crate::assert_float_eq;

#[test]
fn hundred_days_at_a_tenth() {
  let time = uniform(100.0, 0.1).unwrap();

  assert_eq!(time.len(), 1001);
  assert_eq!(time[0], 0.0);
  assert_eq!(time[1000], 100.0);
  assert_float_eq!(time[1] - time[0], 0.1, 1e-12);
  assert_float_eq!(time[500], 50.0, 1e-12);
}

#[test]
fn rejects_degenerate_grids() {
  let grids = [(0.0, 0.1), (10.0, 0.0), (10.0, -1.0), (1.0, 5.0)];
  for (t_max, dt) in grids.iter() {
    match uniform(*t_max, *dt) {
      Err(Error::InvalidGrid { .. }) => {}
      other => panic!("unexpected {:?}", other),
    }
  }
  assert!(uniform(std::f64::NAN, 0.1).is_err());
}

#[test]
fn ratio_rounding_keeps_last_point() {
  assert_eq!(uniform(0.3, 0.1).unwrap().len(), 4);
}

#[test]
fn rejects_oversized_grids() {
  for (t_max, dt) in [(1e300, 1e-300), (1e9, 1.0), (1.0, 1e-300)].iter() {
    match uniform(*t_max, *dt) {
      Err(Error::InvalidGrid { .. }) => {}
      other => panic!("unexpected {:?}", other.map(|time| time.len())),
    }
  }
}
