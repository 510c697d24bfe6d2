//! Criterion benchmarks for the option pricing engines.
//!
//! Benchmarks cover:
//! - RNG throughput (single draws vs batch fill)
//! - Closed-form European pricing
//! - Binomial American put across tree sizes
//! - Monte Carlo barrier and basket kernels across path counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::traits::Priceable;
use pricer_models::instruments::OptionType;
use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::options::{
    AmericanPutOption, BasketCallOption, BasketMethod, EuropeanOption, UpAndInCallOption,
};
use pricer_pricing::rng::PricerRng;

fn bench_rng(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng");

    for n in [1_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("normal_single", n), &n, |b, &n| {
            let mut rng = PricerRng::from_seed(42);
            b.iter(|| {
                let mut sum = 0.0;
                for _ in 0..n {
                    sum += rng.gen_normal();
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("normal_fill", n), &n, |b, &n| {
            let mut rng = PricerRng::from_seed(42);
            let mut buffer = vec![0.0; n];
            b.iter(|| {
                rng.fill_normal(&mut buffer);
                black_box(buffer.iter().sum::<f64>())
            });
        });
    }

    group.finish();
}

fn bench_closed_form_and_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("deterministic");

    let european =
        EuropeanOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    group.bench_function("european_call", |b| {
        b.iter(|| black_box(european.price().unwrap()))
    });

    for steps in [100, 500, 1_000] {
        let put = AmericanPutOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2)
            .unwrap()
            .with_steps(steps);
        group.bench_with_input(BenchmarkId::new("american_put", steps), &put, |b, put| {
            b.iter(|| black_box(put.price().unwrap()))
        });
    }

    group.finish();
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(20);

    for n_paths in [1_000, 10_000] {
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(252)
            .build()
            .unwrap();
        let barrier = UpAndInCallOption::new("SPX", 100.0, 100.0, 120.0, 1.0, 0.05, 0.2)
            .unwrap()
            .with_config(config);
        group.bench_with_input(
            BenchmarkId::new("up_and_in_call", n_paths),
            &barrier,
            |b, option| b.iter(|| black_box(option.price().unwrap())),
        );
    }

    for n_paths in [10_000, 100_000] {
        let config = MonteCarloConfig::builder().n_paths(n_paths).build().unwrap();
        let basket = BasketCallOption::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![100.0, 80.0, 120.0],
            vec![0.4, 0.3, 0.3],
            vec![0.2, 0.25, 0.3],
            vec![
                vec![1.0, 0.5, 0.3],
                vec![0.5, 1.0, 0.4],
                vec![0.3, 0.4, 1.0],
            ],
            100.0,
            1.0,
            0.05,
        )
        .unwrap()
        .with_method(BasketMethod::MonteCarlo(config));
        group.bench_with_input(
            BenchmarkId::new("basket_call", n_paths),
            &basket,
            |b, option| b.iter(|| black_box(option.price().unwrap())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rng,
    bench_closed_form_and_tree,
    bench_monte_carlo
);
criterion_main!(benches);
