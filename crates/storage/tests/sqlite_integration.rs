use chrono::Duration;
use quiz_core::model::{AttemptRecord, OptionKey, ProgressSnapshot, QuestionId, QuizKey, UserAnswers};
use quiz_core::time::fixed_now;
use storage::repository::{AttemptRepository, SnapshotRepository, StorageError};
use storage::sqlite::SqliteRepository;

fn answers(pairs: &[(u64, OptionKey)]) -> UserAnswers {
    pairs
        .iter()
        .map(|(id, key)| (QuestionId::new(*id), *key))
        .collect()
}

fn key(raw: &str) -> QuizKey {
    QuizKey::new(raw).unwrap()
}

#[tokio::test]
async fn sqlite_snapshot_upserts_and_clears() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_snapshots?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Migrations are idempotent.
    repo.migrate().await.expect("migrate again");

    let k = key("history-101");
    assert!(repo.load_snapshot(&k).await.unwrap().is_none());

    let first = ProgressSnapshot::new(answers(&[(1, OptionKey::A)]), 120);
    repo.save_snapshot(&k, &first, fixed_now()).await.unwrap();

    let second = ProgressSnapshot::new(answers(&[(1, OptionKey::B), (7, OptionKey::D)]), 115);
    let later = fixed_now() + Duration::seconds(5);
    repo.save_snapshot(&k, &second, later).await.unwrap();

    let stored = repo.load_snapshot(&k).await.unwrap().expect("snapshot");
    assert_eq!(stored.snapshot, second);
    assert_eq!(stored.saved_at, later);

    repo.clear_snapshot(&k).await.unwrap();
    assert!(repo.load_snapshot(&k).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_attempts_roundtrip_and_order() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_attempts?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let now = fixed_now();
    let older = AttemptRecord::from_persisted(
        key("bio"),
        "Biology".into(),
        now,
        now + Duration::seconds(40),
        40,
        1,
        3,
        false,
        answers(&[(1, OptionKey::A)]),
    )
    .unwrap();
    let newer = AttemptRecord::from_persisted(
        key("bio"),
        "Biology".into(),
        now + Duration::hours(1),
        now + Duration::hours(1) + Duration::seconds(90),
        90,
        3,
        3,
        true,
        answers(&[(1, OptionKey::A), (2, OptionKey::B), (3, OptionKey::C)]),
    )
    .unwrap();

    let older_id = repo.append_attempt(&older).await.unwrap();
    let newer_id = repo.append_attempt(&newer).await.unwrap();

    let fetched = repo.get_attempt(newer_id).await.unwrap();
    assert_eq!(fetched, newer);
    assert!(fetched.timed_out());

    let rows = repo.list_attempts(&key("bio"), 10).await.unwrap();
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![newer_id, older_id]);

    assert!(repo.list_attempts(&key("chem"), 10).await.unwrap().is_empty());
    assert!(matches!(
        repo.get_attempt(newer_id + 100).await,
        Err(StorageError::NotFound)
    ));
}
