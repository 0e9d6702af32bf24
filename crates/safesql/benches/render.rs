use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use safesql::{BackslashEscaper, PairList, Renderer, Statement, StatementBatch, Value, args};

/// SELECT `col0`, `col1`, ... FROM `t` WHERE `col0` = 0 AND `col1` = "v1" ...
fn build_select(n: usize) -> Statement {
    let columns: Value = (0..n).map(|i| format!("col{i}")).collect();
    let filter: PairList = (0..n)
        .map(|i| {
            let value = if i % 2 == 0 {
                Value::from(i as i64)
            } else {
                Value::from(format!("v{i}"))
            };
            (format!("col{i}"), value)
        })
        .collect();
    Statement::with_args("SELECT %LC FROM %T WHERE %W", args![columns, "t", filter])
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/select");
    let renderer = Renderer::new(&BackslashEscaper);

    for n in [1, 5, 10, 50, 100] {
        let stmt = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(renderer.render(stmt).unwrap()));
        });
    }

    group.finish();
}

fn bench_values_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/values_rows");
    let renderer = Renderer::new(&BackslashEscaper);

    for rows in [10, 100, 1000] {
        let data: Value = (0..rows)
            .map(|i| {
                let name = format!("name'{i}");
                Value::List(vec![Value::from(i), Value::from(name), Value::Null])
            })
            .collect();
        let columns = Value::from_iter(["id", "name", "deleted_at"]);
        let stmt = Statement::with_args(
            "INSERT INTO %T (%LC) VALUES %V",
            args!["users", columns, data],
        );
        group.bench_with_input(BenchmarkId::from_parameter(rows), &stmt, |b, stmt| {
            b.iter(|| black_box(renderer.render(stmt).unwrap()));
        });
    }

    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/escape");
    let renderer = Renderer::new(&BackslashEscaper);

    for len in [16, 256, 4096] {
        let text: String = "it's \"quoted\"\n".chars().cycle().take(len).collect();
        let stmt = Statement::with_args("SELECT %s", args![text]);
        group.bench_with_input(BenchmarkId::from_parameter(len), &stmt, |b, stmt| {
            b.iter(|| black_box(renderer.render(stmt).unwrap()));
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/batch");

    for n in [2, 10, 100] {
        let statements: Vec<Statement> = (0..n)
            .map(|i| {
                let set = PairList::new().pair("n", i);
                Statement::with_args("UPDATE t SET %U WHERE id = %d", args![set, i])
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &statements, |b, stmts| {
            b.iter(|| {
                let mut batch = StatementBatch::new(stmts.clone());
                black_box(batch.render_all(Some(&BackslashEscaper)).unwrap().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_values_rows, bench_escape, bench_batch);
criterion_main!(benches);
