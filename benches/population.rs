//! Benchmarks for Cell Culture generation updates.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cell_culture::{
    compute::{Population, RuleSelector},
    schema::{ExecutionMode, RandomFill, SimulationConfig},
};

fn population(size: usize, rule: &str, execution: ExecutionMode) -> Population {
    let config = SimulationConfig {
        width: size,
        height: size,
        even_rule: rule.to_string(),
        random: RandomFill {
            alive_probability: 1.0 / 3.0,
            rng_seed: Some(42),
        },
        execution,
        ..Default::default()
    };
    let selector = RuleSelector::new(config.aging);
    Population::initiate(&config, &selector).unwrap()
}

fn bench_advance_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_generation");

    for size in [64, 256, 1024] {
        for (label, execution) in [
            ("sequential", ExecutionMode::Sequential),
            ("parallel", ExecutionMode::Parallel),
        ] {
            let mut population = population(size, "conway", execution);
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}x{}", size, size)),
                &size,
                |b, _| {
                    b.iter(|| black_box(population.advance_generation()));
                },
            );
        }
    }

    group.finish();
}

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");

    for rule in ["conway", "von_neumann", "erik"] {
        let mut population = population(256, rule, ExecutionMode::Sequential);
        group.bench_function(rule, |b| {
            b.iter(|| black_box(population.advance_generation()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance_generation, bench_rules);
criterion_main!(benches);
