use criterion::{black_box, criterion_group, criterion_main, Criterion};
use epidemic::ode::{Euler, EulerSettings, Integrator};
use epidemic::seir::sweep;
use epidemic::{time_grid, Coefficient, Seir};

fn covid() -> Seir {
  Seir::new(1.75, 0.2, 0.5, 0.9999, 0.0001, 0.0, 0.0)
}

fn trajectory(c: &mut Criterion) {
  for dt in [0.1, 0.01, 0.001].iter() {
    let time = time_grid::uniform(100.0, *dt)
      .expect("benchmark grids are valid");
    let model = covid();

    c.bench_function(&format!("trajectory {} points", time.len()), |b| {
      b.iter(|| model.trajectory(black_box(&time)))
    });
  }

  let time =
    time_grid::uniform(100.0, 0.01).expect("benchmark grids are valid");
  let scheduled = covid().with_distancing(Coefficient::time_varying(|step| {
    if step < 3000 {
      1.0
    } else {
      0.4
    }
  }));
  c.bench_function("trajectory time varying rho", |b| {
    b.iter(|| scheduled.trajectory(black_box(&time)))
  });
}

fn euler_step(c: &mut Criterion) {
  let model = covid();
  let mut integrator: Euler<Seir> = Euler::new(EulerSettings {});
  let mut state = model.initial_state();
  let mut step = 0;
  let time_step = 0.1;

  c.bench_function("euler step", |b| {
    b.iter(|| integrator.step(&model, &mut state, &mut step, &time_step))
  });
}

fn distancing_sweep(c: &mut Criterion) {
  let time =
    time_grid::uniform(100.0, 0.01).expect("benchmark grids are valid");
  let rhos: Vec<Coefficient> =
    (0..16).map(|k| Coefficient::from(k as f64 / 15.0)).collect();
  let model = covid();

  c.bench_function("sweep 16 rho values", |b| {
    b.iter(|| sweep::sweep_distancing(&model, black_box(&rhos), &time))
  });
}

criterion_group!(benches, trajectory, euler_step, distancing_sweep);
criterion_main!(benches);
