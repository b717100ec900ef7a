use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cosmic_quiz::adapter::{FixedQuestionSource, MemoryStore, RecordingTimer};
use cosmic_quiz::core::scoring::calculate_rank;
use cosmic_quiz::core::snapshot;
use cosmic_quiz::types::{Question, TOTAL_QUESTIONS};
use cosmic_quiz::{GameConfig, GameSession};

fn bank() -> Vec<Question> {
    (0..TOTAL_QUESTIONS)
        .map(|i| {
            Question::new(
                format!("Question {i}"),
                vec!["a".into(), "b".into(), "c".into(), "d".into()],
                0,
            )
        })
        .collect()
}

fn new_session() -> GameSession {
    GameSession::new(
        GameConfig::cosmic(),
        Box::new(FixedQuestionSource::new(bank())),
        Box::new(MemoryStore::new()),
        Box::new(RecordingTimer::new()),
    )
    .expect("valid config")
}

fn bench_full_run(c: &mut Criterion) {
    c.bench_function("full_run_10_questions", |b| {
        b.iter(|| {
            let mut session = new_session();
            session.select_difficulty(black_box("orbit")).unwrap();
            for _ in 0..TOTAL_QUESTIONS {
                session.submit_answer(black_box(0)).unwrap();
                session.advance().unwrap();
            }
            session.score()
        })
    });
}

fn bench_calculate_rank(c: &mut Criterion) {
    let config = GameConfig::cosmic();
    c.bench_function("calculate_rank", |b| {
        b.iter(|| calculate_rank(&config.ranks, black_box(600)))
    });
}

fn bench_snapshot_codec(c: &mut Criterion) {
    let mut session = new_session();
    session.select_difficulty("orbit").unwrap();
    session.submit_answer(0).unwrap();
    let snap = session.snapshot();
    let raw = snapshot::encode(&snap).unwrap();

    c.bench_function("snapshot_encode", |b| b.iter(|| snapshot::encode(&snap)));
    c.bench_function("snapshot_decode", |b| {
        b.iter(|| snapshot::decode(black_box(&raw)))
    });
}

criterion_group!(benches, bench_full_run, bench_calculate_rank, bench_snapshot_codec);
criterion_main!(benches);
