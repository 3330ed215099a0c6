use clap::Parser;
use epidemic::{report, seir::sweep, time_grid, Coefficient, Result, Seir};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Rates accept a number (`1.75`), an inline step schedule (`0:1.75,300:0.5`)
/// or a schedule file (`@lockdown.txt`). Schedules are indexed by step, not by
/// day.
#[derive(Parser)]
#[command(name = "epidemic", version, about = "SEIR epidemic simulation")]
struct Opts {
  /// Contact rate
  #[arg(long, default_value = "1.75")]
  beta: Coefficient,

  /// Inverse of the incubation period
  #[arg(long, default_value = "0.2")]
  alpha: Coefficient,

  /// Inverse of the infectious period
  #[arg(long, default_value = "0.5")]
  gamma: Coefficient,

  /// Social distancing factor, repeat to sweep several values
  #[arg(long, default_value = "1")]
  rho: Vec<Coefficient>,

  /// Population size used to seed one exposed individual
  #[arg(long, default_value_t = 10_000.0)]
  population: f64,

  #[arg(long)]
  s0: Option<f64>,

  #[arg(long)]
  e0: Option<f64>,

  #[arg(long)]
  i0: Option<f64>,

  #[arg(long)]
  r0: Option<f64>,

  /// Simulated days
  #[arg(long, default_value_t = 100.0)]
  t_max: f64,

  /// Step size in days
  #[arg(long, default_value_t = 0.1)]
  dt: f64,

  /// CSV destination, stdout if omitted
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Hide the progress bar
  #[arg(short, long)]
  quiet: bool,
}

impl Opts {
  fn initial_condition(&self) -> [f64; 4] {
    let seed = 1.0 / self.population;
    [
      self.s0.unwrap_or(1.0 - seed),
      self.e0.unwrap_or(seed),
      self.i0.unwrap_or(0.0),
      self.r0.unwrap_or(0.0),
    ]
  }

  // rough forward Euler stability bound, only known for constant rates
  fn stability_limit(&self) -> Option<f64> {
    let rates = [
      self.beta.as_constant()?,
      self.alpha.as_constant()?,
      self.gamma.as_constant()?,
    ];
    Some(2.0 / rates.iter().sum::<f64>())
  }
}

fn run_label(idx: usize, rho: &Coefficient) -> String {
  match rho.as_constant() {
    Some(value) => format!("rho={}", value),
    None => format!("rho#{}", idx),
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    )
    .with_writer(io::stderr)
    .init();

  let opts = Opts::parse();

  let time = time_grid::uniform(opts.t_max, opts.dt)?;
  let [s0, e0, i0, r0] = opts.initial_condition();

  info!(
    beta = %opts.beta,
    alpha = %opts.alpha,
    gamma = %opts.gamma,
    runs = opts.rho.len(),
    points = time.len(),
    "starting simulation"
  );

  if let Some(limit) = opts.stability_limit() {
    if opts.dt > limit {
      warn!(
        dt = opts.dt,
        limit,
        "step size may be too large for explicit Euler"
      );
    }
  }

  let models: Vec<Seir> = opts
    .rho
    .iter()
    .map(|rho| {
      Seir::new(
        opts.beta.clone(),
        opts.alpha.clone(),
        opts.gamma.clone(),
        s0,
        e0,
        i0,
        r0,
      )
      .with_distancing(rho.clone())
    })
    .collect();

  let bar = if opts.quiet {
    ProgressBar::hidden()
  } else {
    ProgressBar::new(models.len() as u64)
  };
  bar.set_style(
    ProgressStyle::default_bar()
      .template("{msg} [{elapsed_precise}] {wide_bar} {pos}/{len}"),
  );
  bar.set_message("simulating");

  let start = Instant::now();
  let trajectories = sweep::run_all(&models, &time, || bar.inc(1));
  bar.finish();

  for (rho, trajectory) in opts.rho.iter().zip(&trajectories) {
    let final_state = trajectory.final_state();
    info!(
      rho = %rho,
      s = final_state.s(),
      r = final_state.r(),
      "final state"
    );
  }
  info!(
    elapsed_ms = start.elapsed().as_millis() as u64,
    "simulation finished"
  );

  let runs: Vec<(String, _)> = opts
    .rho
    .iter()
    .enumerate()
    .map(|(idx, rho)| run_label(idx, rho))
    .zip(trajectories)
    .collect();

  match &opts.output {
    Some(path) => {
      let mut writer = BufWriter::new(File::create(path)?);
      report::write_csv(&mut writer, &time, &runs)?;
      info!(path = %path.display(), "wrote trajectories");
    }
    None => {
      let stdout = io::stdout();
      let mut writer = stdout.lock();
      report::write_csv(&mut writer, &time, &runs)?;
      writer.flush()?;
    }
  }

  Ok(())
}
