use crate::{Error, Result};
use regex::Regex;
use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::Path;
use std::str::FromStr;

const ENTRY_PATTERN: &str =
  r"^(\d+)\s*[:=\s]\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)$";

/// Piecewise constant rate over step indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
  breakpoints: Vec<(usize, f64)>, // sorted by step
}

impl Schedule {
  pub fn new(breakpoints: Vec<(usize, f64)>) -> Result<Self> {
    if breakpoints.is_empty() {
      return Err(Error::EmptySchedule);
    }

    for pair in breakpoints.windows(2) {
      let (previous, step) = (pair[0].0, pair[1].0);
      if step <= previous {
        return Err(Error::UnorderedSchedule { previous, step });
      }
    }

    Ok(Self { breakpoints })
  }

  pub fn breakpoints(&self) -> &[(usize, f64)] {
    &self.breakpoints
  }

  /// Value of the last breakpoint at or before `step`. Steps before the
  /// first breakpoint take its value.
  pub fn eval(&self, step: usize) -> f64 {
    let idx = self
      .breakpoints
      .iter()
      .take_while(|(start, _)| *start <= step)
      .count();

    self.breakpoints[idx.saturating_sub(1)].1
  }

  /// One `step value` pair per line. Blank lines and `#` comments are
  /// skipped.
  pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
    let entry_re = entry_regex();
    let mut breakpoints = Vec::new();

    for line in reader.lines() {
      let line = line?;
      let line = line.split('#').next().unwrap_or("").trim();
      if line.is_empty() {
        continue;
      }

      breakpoints.push(parse_entry(&entry_re, line)?);
    }

    Self::new(breakpoints)
  }

  pub fn load(path: &Path) -> Result<Self> {
    Self::from_reader(BufReader::new(File::open(path)?))
  }
}

/// Comma separated entries, e.g. `0:1.75,300:0.5`.
impl FromStr for Schedule {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let entry_re = entry_regex();

    let breakpoints = s
      .split(',')
      .map(|entry| parse_entry(&entry_re, entry.trim()))
      .collect::<Result<Vec<_>>>()?;

    Self::new(breakpoints)
  }
}

fn entry_regex() -> Regex {
  Regex::new(ENTRY_PATTERN).unwrap()
}

fn parse_entry(entry_re: &Regex, entry: &str) -> Result<(usize, f64)> {
  let malformed = || Error::MalformedEntry {
    entry: entry.to_owned(),
  };

  let captures = entry_re.captures(entry).ok_or_else(malformed)?;
  let step = captures[1].parse().map_err(|_| malformed())?;
  let value = captures[2].parse().map_err(|_| malformed())?;

  Ok((step, value))
}

#[cfg(test)]
use proptest::prelude::*;

#[test]
fn eval_holds_last_breakpoint() {
  let schedule = Schedule::new(vec![(10, 1.75), (300, 0.5), (600, 1.0)])
    .unwrap();

  assert_eq!(schedule.eval(0), 1.75);
  assert_eq!(schedule.eval(10), 1.75);
  assert_eq!(schedule.eval(299), 1.75);
  assert_eq!(schedule.eval(300), 0.5);
  assert_eq!(schedule.eval(599), 0.5);
  assert_eq!(schedule.eval(100_000), 1.0);
}

#[test]
fn parses_inline_entries() {
  let schedule: Schedule = "0:1.75, 300=0.5,450 1e-1".parse().unwrap();

  assert_eq!(schedule.breakpoints(), &[(0, 1.75), (300, 0.5), (450, 0.1)]);
}

#[test]
fn rejects_bad_inline_entries() {
  match "0:1.75,x:0.5".parse::<Schedule>() {
    Err(Error::MalformedEntry { entry }) => assert_eq!(entry, "x:0.5"),
    other => panic!("unexpected {:?}", other),
  }

  match "300:1.0,300:0.5".parse::<Schedule>() {
    Err(Error::UnorderedSchedule { previous, step }) => {
      assert_eq!((previous, step), (300, 300))
    }
    other => panic!("unexpected {:?}", other),
  }

  assert!("".parse::<Schedule>().is_err());
}

#[test]
fn reads_lines_with_comments() {
  let text = "# lockdown at day 30 with dt = 0.1\n\
              0 1.0\n\
              \n\
              300 0.3   # strict\n\
              900 0.8\n";

  let schedule = Schedule::from_reader(text.as_bytes()).unwrap();

  assert_eq!(schedule.breakpoints(), &[(0, 1.0), (300, 0.3), (900, 0.8)]);
}

#[test]
fn empty_file_is_rejected() {
  match Schedule::from_reader("# nothing\n\n".as_bytes()) {
    Err(Error::EmptySchedule) => {}
    other => panic!("unexpected {:?}", other),
  }
}

#[cfg(test)]
proptest! {
#[test]
fn eval_is_a_breakpoint_value(
  steps in prop::collection::btree_set(0usize..10_000, 1..20),
  probe in 0usize..20_000,
) {
  let breakpoints: Vec<(usize, f64)> =
    steps.iter().map(|step| (*step, *step as f64 * 0.5)).collect();
  let schedule = Schedule::new(breakpoints.clone()).unwrap();

  let value = schedule.eval(probe);
  let expected = breakpoints
    .iter()
    .rev()
    .find(|(start, _)| *start <= probe)
    .unwrap_or(&breakpoints[0])
    .1;
  assert_eq!(value, expected);
}
}
