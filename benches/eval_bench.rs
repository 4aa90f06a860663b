use chess_vs_ai::board::cozy::Position;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_eval(c: &mut Criterion) {
    let p = Position::startpos();
    c.bench_function("evaluate_startpos", |ben| {
        ben.iter(|| {
            let v = chess_vs_ai::search::eval::evaluate(black_box(&p));
            black_box(v)
        })
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
