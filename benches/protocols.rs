use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::{criterion_group, criterion_main};
use homomorphic_protocols::homomorphic::RandomnessMode;
use homomorphic_protocols::paillier::{keygen, PrivateKey};
use homomorphic_protocols::params::ParamSet;
use homomorphic_protocols::protocols::ot::{self, Choice};
use homomorphic_protocols::protocols::pir::{self, Database};
use homomorphic_protocols::protocols::regression;
use num_bigint::BigUint;
use rand::thread_rng;

fn paillier_key(params: ParamSet) -> PrivateKey {
    let (p, q) = params.paillier_primes().unwrap();
    keygen(&p, &q).unwrap()
}

fn bench_pir_respond(c: &mut Criterion) {
    let min_e = 1;
    let max_e = 5;

    let mut rng = thread_rng();
    let mut group = c.benchmark_group("pir_respond_time");
    for (name, params) in [("toy", ParamSet::Toy), ("demo", ParamSet::Demo)] {
        let sk = paillier_key(params);
        let pk = sk.public_key();

        for e in min_e..=max_e {
            let size: usize = 1 << e;
            let db = Database::from_fn(size, size, |i, j| BigUint::from((i + 1) * (j + 1))).unwrap();
            let query = pir::query(pk, size, size - 1, RandomnessMode::Fresh, &mut rng).unwrap();

            group.throughput(Throughput::Elements((size * size) as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| pir::respond(pk, &db, &query).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_ot(c: &mut Criterion) {
    let mut rng = thread_rng();
    let mut group = c.benchmark_group("ot_time");
    for (name, params) in [("toy", ParamSet::Toy), ("demo", ParamSet::Demo)] {
        let sk = paillier_key(params);
        let pk = sk.public_key();
        let x0 = BigUint::from(17u32);
        let x1 = BigUint::from(42u32);

        group.bench_function(name, |b| {
            b.iter(|| {
                let request = ot::request(pk, Choice::One, &mut rng).unwrap();
                let offer = ot::offer(pk, &x0, &x1, &request, &mut rng).unwrap();
                ot::extract(&sk, Choice::One, &offer).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_regression_evaluate(c: &mut Criterion) {
    let min_e = 1;
    let max_e = 6;

    let mut rng = thread_rng();
    let sk = paillier_key(ParamSet::Toy);
    let pk = sk.public_key();

    let mut group = c.benchmark_group("regression_evaluate_time");
    for e in min_e..=max_e {
        let size: usize = 1 << e;
        let x = (0..size).map(|i| i as f64 * 0.5 - 3.0).collect::<Vec<_>>();
        let theta = (0..=size).map(|i| 1.0 - i as f64 * 0.25).collect::<Vec<_>>();
        let features = regression::encrypt_features(pk, &x, RandomnessMode::Fresh, &mut rng).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("toy", size), &size, |b, _| {
            b.iter(|| regression::evaluate(pk, &features, &theta, &mut rng).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_pir_respond, bench_ot, bench_regression_evaluate
);
criterion_main!(benches);
