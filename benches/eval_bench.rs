use criterion::{criterion_group, criterion_main, Criterion, black_box};
use checkers::search::{evaluate, Features};
use checkers::{Board, Side};

fn bench_eval(c: &mut Criterion) {
    let b = Board::standard();
    let parent = Features::default();
    c.bench_function("evaluate_opening", |ben| {
        ben.iter(|| {
            let e = evaluate(black_box(&b), Side::Black, &parent);
            black_box(e.value)
        })
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
