mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{Backend, FATIHA_1};
use mizan_client::history::{EntrySource, NewHistoryEntry, HISTORY_STORAGE_KEY};
use mizan_client::session::SessionEvent;
use mizan_client::{
    AnalysisRequest, AnalysisResult, ErrorKind, HistoryCache, LetterBreakdown, MemoryStorage,
    RequestStatus, ResultSource,
};
use serde_json::json;

fn assert_breakdown_consistent(result: &AnalysisResult) {
    let breakdown = result.breakdown.as_ref().expect("breakdown present");
    let count_sum: u64 = breakdown.iter().map(|b| b.count).sum();
    assert_eq!(count_sum, result.letter_count);

    let percentage_sum: f64 = breakdown.iter().map(|b| b.percentage).sum();
    assert!(
        (percentage_sum - 100.0).abs() < 0.1,
        "percentages summed to {percentage_sum}"
    );
}

fn letter<'a>(result: &'a AnalysisResult, letter: &str) -> &'a LetterBreakdown {
    result
        .breakdown
        .as_ref()
        .and_then(|b| b.iter().find(|entry| entry.letter == letter))
        .unwrap_or_else(|| panic!("no breakdown entry for {letter}"))
}

#[tokio::test]
async fn verse_reference_should_yield_database_result() {
    let backend = Backend::start().await;
    backend.mount_fatiha_1().await;
    let session = backend.session();

    let result = session
        .analyze(&AnalysisRequest::verse(1, 1))
        .await
        .expect("verse analysis should succeed");

    assert_eq!(result.text, FATIHA_1);
    assert_eq!(result.letter_count, 19);
    assert_eq!(result.word_count, 4);
    assert_eq!(result.abjad_value, 786);
    assert_eq!(result.source(), Some(ResultSource::Database));

    let metadata = result.metadata.as_ref().unwrap();
    assert_eq!((metadata.surah, metadata.ayah), (Some(1), Some(1)));
    assert!(!metadata.approximate_counts);

    assert_breakdown_consistent(&result);
    let ba = letter(&result, "ب");
    assert_eq!(ba.abjad_value, Some(2 * ba.count));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, RequestStatus::Succeeded);
    assert_eq!(snapshot.result, Some(result));
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn verse_breakdown_should_follow_backend_frequency_table() {
    let backend = Backend::start().await;
    backend.mount_fatiha_1_with_frequency().await;
    let session = backend.session();

    let result = session.analyze(&AnalysisRequest::verse(1, 1)).await.unwrap();

    assert_breakdown_consistent(&result);
    let lam = letter(&result, "ل");
    assert_eq!(lam.count, 4);
    assert_eq!(lam.abjad_value, Some(120));
    assert_eq!(lam.percentage, 21.05);
    assert_eq!(result.breakdown.as_ref().unwrap()[0].letter, "ل");
}

#[tokio::test]
async fn free_text_breakdown_should_include_letters_the_backend_skips() {
    let backend = Backend::start().await;
    let breakdown = json!([
        {"letter": "ب", "value": 2},
        {"letter": "س", "value": 60},
        {"letter": "م", "value": 40},
        {"letter": "ا", "value": 1},
        {"letter": "ل", "value": 30},
        {"letter": "ل", "value": 30},
        {"letter": "ه", "value": 5}
    ]);
    backend
        .mount_abjad_breakdown("بسم، الله", 168, breakdown, None)
        .await;
    let session = backend.session();

    let result = session
        .analyze(&AnalysisRequest::text("بسم، الله"))
        .await
        .unwrap();

    assert_eq!(result.letter_count, 8);
    assert_breakdown_consistent(&result);
    assert_eq!(letter(&result, "ل").abjad_value, Some(60));
    assert_eq!(letter(&result, "ل").percentage, 25.0);
    assert_eq!(letter(&result, "،").abjad_value, None);
}

#[tokio::test]
async fn free_text_should_count_locally() {
    let backend = Backend::start().await;
    backend.mount_abjad("بسم الله", 168, None).await;
    let session = backend.session();

    let result = session
        .analyze(&AnalysisRequest::text("بسم الله"))
        .await
        .expect("text analysis should succeed");

    assert_eq!(result.letter_count, 7);
    assert_eq!(result.word_count, 2);
    assert_eq!(result.abjad_value, 168);
    assert_eq!(result.source(), Some(ResultSource::Custom));
    assert_breakdown_consistent(&result);
    assert!(result.metadata.unwrap().approximate_counts);
}

#[tokio::test]
async fn invalid_request_should_fail_without_network() {
    let backend = Backend::start().await;
    let session = backend.session();

    let outcome = session.analyze(&AnalysisRequest::text("   ")).await;

    assert!(outcome.is_none());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, RequestStatus::Failed);
    assert_eq!(snapshot.error.unwrap().kind, ErrorKind::InvalidRequest);
    assert_eq!(backend.request_count().await, 0);
}

#[tokio::test]
async fn backend_validation_error_should_surface_detail() {
    let backend = Backend::start().await;
    backend
        .mount_failure(
            "/api/v1/analysis/abjad",
            422,
            json!({"detail": [
                {"loc": ["query", "text"], "msg": "field required", "type": "missing"},
                {"loc": ["query", "system"], "msg": "unexpected value", "type": "enum"}
            ]}),
        )
        .await;
    let session = backend.session();

    let outcome = session.analyze(&AnalysisRequest::text("بسم")).await;

    assert!(outcome.is_none());
    let error = session.error().expect("error should be stored");
    assert_eq!(error.kind, ErrorKind::Validation);
    assert_eq!(error.status, 422);
    assert_eq!(error.message, "field required; unexpected value");
    assert!(session.result().is_none());
}

#[tokio::test]
async fn missing_verse_should_be_not_found() {
    let backend = Backend::start().await;
    backend
        .mount_failure(
            "/api/v1/analysis/verse/1/99",
            404,
            json!({"detail": "Verse 1:99 not found"}),
        )
        .await;
    let session = backend.session();

    assert!(session.analyze(&AnalysisRequest::verse(1, 99)).await.is_none());

    let error = session.error().unwrap();
    assert_eq!(error.kind, ErrorKind::NotFound);
    assert_eq!(error.message, "Verse 1:99 not found");
}

#[tokio::test]
async fn session_should_be_pending_before_first_poll() {
    let backend = Backend::start().await;
    backend.mount_abjad("بسم", 102, None).await;
    let session = backend.session();
    let request = AnalysisRequest::text("بسم");

    let pending = session.analyze(&request);
    assert!(session.is_loading());

    assert!(pending.await.is_some());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn slower_earlier_dispatch_should_not_overwrite_newer_result() {
    let backend = Backend::start().await;
    backend
        .mount_abjad("الله", 66, Some(Duration::from_millis(300)))
        .await;
    backend.mount_abjad("بسم", 102, None).await;
    let session = backend.session();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.subscribe(Box::new(move |event: &SessionEvent| {
        sink.lock().unwrap().push(event.clone());
    }));

    let slow_request = AnalysisRequest::text("الله");
    let fast_request = AnalysisRequest::text("بسم");
    let slow = session.analyze(&slow_request);
    let fast = session.analyze(&fast_request);
    let (slow_outcome, fast_outcome) = tokio::join!(slow, fast);

    assert!(slow_outcome.is_none());
    assert_eq!(fast_outcome.unwrap().abjad_value, 102);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, RequestStatus::Succeeded);
    assert_eq!(snapshot.result.unwrap().text, "بسم");
    assert_eq!(snapshot.generation, 2);

    let events = events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::Discarded { generation: 1, current: 2 })));
}

#[tokio::test]
async fn successful_analysis_should_be_recorded_in_history() {
    let backend = Backend::start().await;
    backend.mount_fatiha_1().await;
    let session = backend.session();
    let storage = MemoryStorage::new();
    let mut history = HistoryCache::open(storage.clone(), 50);

    let result = session.analyze(&AnalysisRequest::verse(1, 1)).await.unwrap();
    let entry = history.add_entry(NewHistoryEntry::from_result(&result));

    assert_eq!(entry.source, EntrySource::Verse);
    assert_eq!(entry.reference().as_deref(), Some("1:1"));
    assert_eq!(entry.abjad_value, 786);
    assert_eq!(history.entries()[0], entry);

    let persisted = storage.get(HISTORY_STORAGE_KEY).expect("snapshot written");
    let doc: serde_json::Value = serde_json::from_str(&persisted).unwrap();
    assert_eq!(doc[0]["id"], json!(entry.id));
    assert_eq!(doc[0]["letterCount"], json!(19));
    assert_eq!(doc[0]["source"], json!("verse"));
}
