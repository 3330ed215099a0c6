use crate::seir::{Compartment, Trajectory};
use std::io::{self, Write};

/// Writes runs as long-form CSV, `run,t,S,E,I,R`, one line per run and grid
/// point.
pub fn write_csv<W: Write>(
  writer: &mut W,
  time: &[f64],
  runs: &[(String, Trajectory)],
) -> io::Result<()> {
  write!(writer, "run,t")?;
  for compartment in Compartment::ALL.iter() {
    write!(writer, ",{}", compartment.symbol())?;
  }
  writeln!(writer)?;

  for (label, trajectory) in runs {
    for (t, state) in time.iter().zip(trajectory.rows()) {
      write!(writer, "{},{}", label, t)?;
      for value in state {
        write!(writer, ",{}", value)?;
      }
      writeln!(writer)?;
    }
  }

  writer.flush()
}

#[cfg(test)]
use crate::seir::SeirState;

#[test]
fn writes_header_and_rows_per_run() {
  let trajectory = Trajectory::from_rows(vec![
    SeirState::new(0.9, 0.1, 0.0, 0.0),
    SeirState::new(0.85, 0.1, 0.05, 0.0),
  ]);
  let runs = vec![
    ("rho=1".to_owned(), trajectory.clone()),
    ("rho=0.5".to_owned(), trajectory),
  ];

  let mut out = Vec::new();
  write_csv(&mut out, &[0.0, 0.5], &runs).unwrap();
  let text = String::from_utf8(out).unwrap();
  let lines: Vec<&str> = text.lines().collect();

  assert_eq!(lines.len(), 5);
  assert_eq!(lines[0], "run,t,S,E,I,R");
  assert_eq!(lines[1], "rho=1,0,0.9,0.1,0,0");
  assert_eq!(lines[2], "rho=1,0.5,0.85,0.1,0.05,0");
  assert_eq!(lines[3], "rho=0.5,0,0.9,0.1,0,0");
}
