use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quantra_ir::{Circuit, QubitId};
use quantra_sim::StateVector;

fn layered_circuit(n: u32, depth: u32) -> Circuit {
    let mut circuit = Circuit::empty(n);
    for layer in 0..depth {
        for q in 0..n {
            circuit = circuit.ry(0.1 * f64::from(layer + 1), QubitId(q)).unwrap();
        }
        for q in 0..n - 1 {
            circuit = circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
        }
    }
    circuit
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("statevector_run");
    for n in [8u32, 12, 16] {
        let circuit = layered_circuit(n, 4);
        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            b.iter(|| StateVector::run(black_box(circuit)).unwrap());
        });
    }
    group.finish();
}

fn bench_measure(c: &mut Criterion) {
    let state = StateVector::run(&Circuit::ghz(12).unwrap()).unwrap();
    c.bench_function("measure_1024_shots_12q", |b| {
        b.iter(|| state.measure(black_box(1024), Some(7)));
    });
}

criterion_group!(benches, bench_run, bench_measure);
criterion_main!(benches);
