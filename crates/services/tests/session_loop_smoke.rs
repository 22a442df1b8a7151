use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{OptionKey, QuestionId, QuizKey, QuizSettings};
use quiz_core::time::fixed_now;
use services::sessions::FocusTarget;
use services::{
    AttemptHistoryService, Clock, InputEvent, NavKey, QuizLoopService, SessionEvent, TimerDriver,
    quiz_from_str,
};
use storage::repository::{AttemptRepository, InMemoryRepository, SnapshotRepository};
use tokio::sync::mpsc;

const QUIZ: &str = r#"{
    "title": "Smoke Quiz",
    "timeLimit": 20,
    "questions": [
        {"id": 1, "question": "One?", "options": [{"key": "A", "text": "1"}, {"key": "B", "text": "2"}], "correctAnswer": "A"},
        {"id": 2, "question": "Two?", "options": [{"key": "A", "text": "1"}, {"key": "B", "text": "2"}], "correctAnswer": "B"},
        {"id": 3, "question": "Three?", "options": [{"key": "A", "text": "3"}, {"key": "B", "text": "4"}, {"key": "C", "text": "5"}], "correctAnswer": "A"}
    ]
}"#;

fn key() -> QuizKey {
    QuizKey::new("smoke").unwrap()
}

#[tokio::test(start_paused = true)]
async fn keyboard_session_submits_and_persists_attempt() {
    let repo = Arc::new(InMemoryRepository::new());
    let quiz = quiz_from_str(QUIZ).unwrap();
    let loop_svc = QuizLoopService::new(Clock::fixed(fixed_now()), repo.clone(), repo.clone());

    let mut session = loop_svc
        .start_session(key(), &quiz, &QuizSettings::default())
        .await
        .unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let timer = TimerDriver::start(tx.clone());
    let keys = [
        NavKey::Char('1'),
        NavKey::Enter,
        NavKey::Char('b'),
        NavKey::ArrowRight,
        NavKey::Char('c'),
    ];
    for key in keys {
        tx.send(SessionEvent::Input(InputEvent::key(key))).unwrap();
    }
    // Typing into a text field must not move the session.
    tx.send(SessionEvent::Input(InputEvent::Key {
        key: NavKey::ArrowLeft,
        focus: FocusTarget::TextInput,
    }))
    .unwrap();

    let driver = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(3500)).await;
        let _ = driver.send(SessionEvent::Submit);
        let _ = driver.send(SessionEvent::Submit);
    });

    let submission = session.run(&mut rx, timer).await.expect("submitted");
    assert!(!submission.timed_out);
    assert_eq!(submission.elapsed_secs, 3);
    assert_eq!(submission.report.correct, 2);
    assert_eq!(submission.report.total, 3);
    assert_eq!(submission.report.flags(), vec![true, true, false]);
    assert_eq!(session.state().position(), 2);

    let attempt_id = loop_svc.finish(&mut session).await.unwrap();
    let attempt = repo.get_attempt(attempt_id).await.unwrap();
    assert_eq!(attempt.correct(), 2);
    assert_eq!(attempt.title(), "Smoke Quiz");
    assert!(repo.load_snapshot(&key()).await.unwrap().is_none());

    let history = AttemptHistoryService::new(Clock::fixed(fixed_now()), repo.clone());
    let items = history.list_recent(&key(), 5).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, attempt_id);
}

#[tokio::test(start_paused = true)]
async fn interrupted_session_resumes_from_snapshot() {
    let repo = Arc::new(InMemoryRepository::new());
    let quiz = quiz_from_str(QUIZ).unwrap();
    let loop_svc = QuizLoopService::new(Clock::fixed(fixed_now()), repo.clone(), repo.clone());

    {
        let mut session = loop_svc
            .start_session(key(), &quiz, &QuizSettings::default())
            .await
            .unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TimerDriver::start(tx.clone());
        tx.send(SessionEvent::Input(InputEvent::key(NavKey::Char('a'))))
            .unwrap();

        // Seven seconds in, the window closes: the run future is dropped.
        let outcome =
            tokio::time::timeout(Duration::from_millis(7500), session.run(&mut rx, timer)).await;
        assert!(outcome.is_err());
        assert!(!session.is_submitted());
    }
    loop_svc.flush_progress().await;

    let stored = repo.load_snapshot(&key()).await.unwrap().expect("snapshot");
    assert_eq!(stored.snapshot.remaining_secs, 15);
    assert_eq!(
        stored.snapshot.answers.get(QuestionId::new(1)),
        Some(OptionKey::A)
    );

    let resumed = loop_svc
        .start_session(key(), &quiz, &QuizSettings::default())
        .await
        .unwrap();
    assert!(resumed.was_resumed());
    assert_eq!(resumed.state().position(), 1);
    assert_eq!(resumed.state().remaining_secs(), 15);
}

#[tokio::test(start_paused = true)]
async fn expiry_records_a_timed_out_attempt() {
    let repo = Arc::new(InMemoryRepository::new());
    let quiz = quiz_from_str(QUIZ).unwrap();
    let loop_svc = QuizLoopService::new(Clock::fixed(fixed_now()), repo.clone(), repo.clone());
    let mut session = loop_svc
        .start_session(key(), &quiz, &QuizSettings::default())
        .await
        .unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let timer = TimerDriver::start(tx);
    let submission = session.run(&mut rx, timer).await.expect("expired");
    assert!(submission.timed_out);
    assert_eq!(submission.elapsed_secs, 20);
    assert_eq!(submission.report.correct, 0);

    let id = loop_svc.finish(&mut session).await.unwrap();
    assert!(repo.get_attempt(id).await.unwrap().timed_out());
    assert!(repo.load_snapshot(&key()).await.unwrap().is_none());
}
