use criterion::{black_box, criterion_group, criterion_main, Criterion};
use digicalc_parser::parse_expression;

const EXPRESSIONS: &[&str] = &[
    "1+2",
    "2+3*4",
    "(2+3)*(1+1)",
    "(4 + 5 * (7 - 3)) - 2",
    "9*8/7-6+5*4/3-2+1",
    "((((1+2)*3)-4)/5)*((6-7)+(8*9))",
];

fn bench_parse_expressions(c: &mut Criterion) {
    c.bench_function("parse_mixed_expressions", |b| {
        b.iter(|| {
            for source in EXPRESSIONS {
                let node = parse_expression(black_box(source));
                black_box(node.is_ok());
            }
        })
    });
}

fn bench_parse_long_chain(c: &mut Criterion) {
    let mut source = String::from("1");
    for i in 0..500 {
        source.push(if i % 2 == 0 { '+' } else { '*' });
        source.push(char::from(b'0' + (i % 10) as u8));
    }
    c.bench_function("parse_long_chain_1000", |b| {
        b.iter(|| {
            let node = parse_expression(black_box(&source));
            black_box(node.is_ok());
        })
    });
}

criterion_group!(benches, bench_parse_expressions, bench_parse_long_chain);
criterion_main!(benches);
