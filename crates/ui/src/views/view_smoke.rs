use chrono::Duration;
use quiz_core::model::{
    AttemptRecord, OptionKey, ProgressSnapshot, QuestionId, SessionId, UserAnswers,
};
use quiz_core::score;
use quiz_core::time::fixed_now;
use services::Submission;
use storage::repository::{AttemptRepository, SnapshotRepository};

use super::test_harness::{ViewKind, harness_quiz, setup_view_harness};
use crate::context::LastResult;
use crate::vm::ResultsVm;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz, LastResult::default());
    harness.rebuild();
    let html = harness.drive_until("Largest planet?").await;

    assert!(html.contains("Harness Quiz"), "missing title in {html}");
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(html.contains("Jupiter"), "missing option in {html}");
    assert!(html.contains("0 / 2 answered"), "missing progress in {html}");
    assert!(
        html.contains("1:30") || html.contains("1:29"),
        "missing timer in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_resumes_saved_progress() {
    let mut harness = setup_view_harness(ViewKind::Quiz, LastResult::default());
    let answers: UserAnswers = [(QuestionId::new(1), OptionKey::A)].into_iter().collect();
    harness
        .storage
        .snapshots
        .save_snapshot(
            &harness.quiz_key,
            &ProgressSnapshot::new(answers, 45),
            fixed_now(),
        )
        .await
        .expect("save snapshot");

    harness.rebuild();
    let html = harness.drive_until("Closest star?").await;
    assert!(html.contains("Question 2 of 2"), "missing position in {html}");
    assert!(html.contains("1 / 2 answered"), "missing progress in {html}");
    assert!(
        html.contains("0:45") || html.contains("0:44"),
        "missing resumed timer in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_feedback_and_history() {
    let quiz = harness_quiz();
    let answers: UserAnswers = [
        (QuestionId::new(1), OptionKey::A),
        (QuestionId::new(2), OptionKey::A),
    ]
    .into_iter()
    .collect();
    let submission = Submission {
        session_id: SessionId::generate(),
        report: score(&quiz, &answers),
        answers: answers.clone(),
        elapsed_secs: 42,
        timed_out: false,
    };
    let vm = ResultsVm::new(&quiz, &submission, Some(1));

    let mut harness = setup_view_harness(ViewKind::Results, LastResult(Some(vm)));
    let attempt = AttemptRecord::from_persisted(
        harness.quiz_key.clone(),
        quiz.title().to_owned(),
        fixed_now(),
        fixed_now() + Duration::seconds(42),
        42,
        1,
        2,
        false,
        answers,
    )
    .expect("valid attempt");
    harness
        .storage
        .attempts
        .append_attempt(&attempt)
        .await
        .expect("append attempt");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("1 / 2 correct (50%)"), "missing score in {html}");
    assert!(html.contains("Jupiter is a gas giant."), "missing explanation in {html}");
    assert!(html.contains("Correct answer: B. The Sun"), "missing correction in {html}");
    assert!(html.contains("Time used: 0:42"), "missing time in {html}");

    let html = harness.drive_until("2023-11-14").await;
    assert!(html.contains("1 / 2"), "missing history row in {html}");
    assert!(html.contains("2023-11-14"), "missing history date in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_a_result() {
    let mut harness = setup_view_harness(ViewKind::Results, LastResult::default());
    harness.rebuild();
    let html = harness.drive_until("No attempts recorded yet.").await;
    assert!(html.contains("No results yet."), "missing placeholder in {html}");
    assert!(
        html.contains("No attempts recorded yet."),
        "missing empty history in {html}"
    );
}
