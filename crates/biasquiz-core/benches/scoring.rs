use criterion::{black_box, criterion_group, criterion_main, Criterion};

use biasquiz_core::model::Claim;
use biasquiz_core::report::QuizReport;
use biasquiz_core::Quiz;
use chrono::Utc;
use uuid::Uuid;

fn make_quiz(n: usize) -> Quiz {
    let claims = (0..n)
        .map(|i| Claim {
            title: format!("Bias {i}"),
            definition: format!("Definition {i}"),
            is_authentic: i % 3 != 0,
            reference: String::new(),
            category: "Bench".into(),
        })
        .collect();
    let mut quiz = Quiz::new(claims).unwrap();
    for i in 0..n {
        if i > 0 {
            quiz.go_next();
        }
        quiz.answer(i % 2 == 0);
    }
    quiz
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for n in [10, 100, 1000] {
        let quiz = make_quiz(n);
        group.bench_function(format!("n={n}"), |b| b.iter(|| black_box(&quiz).score()));
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    let quiz = make_quiz(10);

    group.bench_function("from_quiz", |b| {
        b.iter(|| QuizReport::from_quiz(black_box(&quiz), Uuid::nil(), Utc::now()))
    });

    let report = QuizReport::from_quiz(&quiz, Uuid::nil(), Utc::now());
    group.bench_function("to_markdown", |b| b.iter(|| black_box(&report).to_markdown()));

    group.finish();
}

criterion_group!(benches, bench_score, bench_report);
criterion_main!(benches);
