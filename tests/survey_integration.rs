//! Integration tests for the survey flow over HTTP
//!
//! Tests the full path: initialize → answer → advance → submit → result

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use common::MockConfig;
use tetotype::core::{HttpBackend, SurveyFlow};
use tetotype::types::{Answer, FlowPhase, Gender, Language, PersonalityType, SurveyError};

async fn flow_for(config: MockConfig) -> (SurveyFlow, Arc<common::Recorded>) {
    let (base, recorded) = common::spawn(config).await;
    (SurveyFlow::new(Arc::new(HttpBackend::new(base))), recorded)
}

/// Male, three option answers, 200 response → completed with the result
#[tokio::test]
async fn test_full_survey_scenario() {
    let (mut flow, recorded) = flow_for(MockConfig::default()).await;

    assert_eq!(flow.initialize(Some(Gender::Male), Language::En).await.unwrap(), 3);
    assert_eq!(flow.phase(), &FlowPhase::Answering(0));

    for (i, q) in ["q1", "q2", "q3"].iter().enumerate() {
        assert_eq!(flow.current_options(), vec!["optA".to_string(), "optB".to_string()]);
        flow.record_option(q, "optA").unwrap();
        if i < 2 {
            flow.advance().unwrap();
        }
    }

    let result = flow.submit().await.unwrap();
    assert_eq!(result.kind, PersonalityType::TetoBoy);
    assert_eq!(flow.phase(), &FlowPhase::Completed(result));

    let sent = recorded.evaluations.lock().unwrap();
    assert_eq!(
        sent[0],
        json!({
            "gender": "male",
            "answers": { "q1": "optA", "q2": "optA", "q3": "optA" },
            "lang": "en"
        })
    );
}

#[tokio::test]
async fn test_questions_requested_in_chosen_language() {
    let (mut flow, recorded) = flow_for(MockConfig::default()).await;
    flow.initialize(Some(Gender::Female), Language::Jp).await.unwrap();
    assert_eq!(recorded.question_langs.lock().unwrap().as_slice(), ["jp".to_string()]);
}

#[tokio::test]
async fn test_missing_gender_makes_no_request() {
    let (mut flow, recorded) = flow_for(MockConfig::default()).await;

    let err = flow.initialize(None, Language::En).await.unwrap_err();
    assert!(matches!(err, SurveyError::MissingPrecondition(_)));
    assert!(recorded.question_langs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_question_fetch_failure_is_load_error() {
    let config = MockConfig {
        questions_status: StatusCode::INTERNAL_SERVER_ERROR,
        ..Default::default()
    };
    let (mut flow, _) = flow_for(config).await;

    let err = flow.initialize(Some(Gender::Male), Language::En).await.unwrap_err();
    assert!(matches!(err, SurveyError::LoadError(_)));
    assert!(err.message().contains("500"), "message should name the status: {}", err);
    assert!(matches!(flow.phase(), FlowPhase::Error(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_load_error() {
    // Nothing listens on port 9 of localhost
    let mut flow = SurveyFlow::new(Arc::new(HttpBackend::new("http://127.0.0.1:9")));
    let err = flow.initialize(Some(Gender::Male), Language::En).await.unwrap_err();
    assert!(matches!(err, SurveyError::LoadError(_)));
}

#[tokio::test]
async fn test_slow_server_times_out_as_load_error() {
    let config = MockConfig {
        questions_delay: Duration::from_secs(5),
        ..Default::default()
    };
    let (base, _) = common::spawn(config).await;
    let mut flow = SurveyFlow::new(Arc::new(HttpBackend::with_timeout(base, Duration::from_millis(200))));

    let err = flow.initialize(Some(Gender::Male), Language::En).await.unwrap_err();
    assert!(matches!(err, SurveyError::LoadError(_)));
}

#[tokio::test]
async fn test_non_string_options_become_free_text() {
    let config = MockConfig {
        questions: json!([
            { "question": "q1", "options": ["A", "B"] },
            { "question": "q2", "options": "[\"A\",\"B\"]" }
        ]),
        ..Default::default()
    };
    let (mut flow, _) = flow_for(config).await;

    assert_eq!(flow.initialize(Some(Gender::Male), Language::En).await.unwrap(), 2);
    assert!(flow.current_options().is_empty());
    flow.record_free_text("q1", "typed").unwrap();
    flow.advance().unwrap();
    assert_eq!(flow.current_options(), vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn test_empty_question_list_is_ready_but_unsubmittable() {
    let config = MockConfig {
        questions: json!([]),
        ..Default::default()
    };
    let (mut flow, recorded) = flow_for(config).await;

    assert_eq!(flow.initialize(Some(Gender::Male), Language::En).await.unwrap(), 0);
    assert!(flow.current_question().is_none());
    assert!(matches!(flow.submit().await, Err(SurveyError::ValidationError(_))));
    assert!(recorded.evaluations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_free_text_questions_and_wire_suffix() {
    let config = MockConfig {
        questions: json!([
            { "question": "Describe yourself", "options": "[\"\"]" },
            { "question": "Pick", "options": "not json" },
            { "question": "Last", "options": null }
        ]),
        ..Default::default()
    };
    let (mut flow, recorded) = flow_for(config).await;
    flow.initialize(Some(Gender::Female), Language::Ko).await.unwrap();

    assert!(flow.current_options().is_empty());
    flow.record_free_text("Describe yourself", "calm").unwrap();
    flow.advance().unwrap();

    assert!(flow.current_options().is_empty());
    flow.record_free_text("Pick", "anything").unwrap();
    flow.advance().unwrap();

    flow.record_free_text("Last", "done").unwrap();
    flow.submit().await.unwrap();

    let sent = recorded.evaluations.lock().unwrap();
    assert_eq!(
        sent[0]["answers"],
        json!({
            "Describe yourself_freeText": "calm",
            "Pick_freeText": "anything",
            "Last_freeText": "done"
        })
    );
    assert_eq!(sent[0]["gender"], "female");
    assert_eq!(sent[0]["lang"], "ko");
}

#[tokio::test]
async fn test_submit_failure_keeps_answers_for_retry() {
    let config = MockConfig {
        questions: json!([{ "question": "only", "options": "[\"A\",\"B\"]" }]),
        evaluate_status: StatusCode::BAD_GATEWAY,
        ..Default::default()
    };
    let (mut flow, recorded) = flow_for(config).await;
    flow.initialize(Some(Gender::Male), Language::En).await.unwrap();
    flow.record_option("only", "B").unwrap();

    let err = flow.submit().await.unwrap_err();
    assert!(matches!(err, SurveyError::SubmitError(_)));
    assert_eq!(flow.phase(), &FlowPhase::Answering(0));
    assert_eq!(flow.answer_for("only"), &Answer::Option("B".into()));

    // No automatic retry; a second submit is a second request
    assert!(flow.submit().await.is_err());
    assert_eq!(recorded.evaluations.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_null_result_text_is_accepted() {
    let config = MockConfig {
        questions: json!([{ "question": "only", "options": "" }]),
        result: json!({ "type": "egen-boy", "explanation": null, "advice": "a", "love_chain_info": null }),
        ..Default::default()
    };
    let (mut flow, _) = flow_for(config).await;
    flow.initialize(Some(Gender::Male), Language::En).await.unwrap();
    flow.record_free_text("only", "x").unwrap();

    let result = flow.submit().await.unwrap();
    assert_eq!(result.kind, PersonalityType::EgenBoy);
    assert_eq!(result.explanation, "");
}

#[tokio::test]
async fn test_malformed_result_is_submit_error() {
    let config = MockConfig {
        questions: json!([{ "question": "only", "options": "" }]),
        result: json!({ "type": "unknown-kind" }),
        ..Default::default()
    };
    let (mut flow, _) = flow_for(config).await;
    flow.initialize(Some(Gender::Male), Language::En).await.unwrap();
    flow.record_free_text("only", "x").unwrap();

    assert!(matches!(flow.submit().await, Err(SurveyError::SubmitError(_))));
}

#[tokio::test]
async fn test_mutual_exclusivity_and_navigation() {
    let (mut flow, _) = flow_for(MockConfig::default()).await;
    flow.initialize(Some(Gender::Male), Language::En).await.unwrap();

    // Unanswered: advance refused, step unchanged
    assert!(flow.advance().unwrap_err().is_user_correctable());
    assert_eq!(flow.step(), 0);

    flow.record_option("q1", "optB").unwrap();
    flow.record_free_text("q1", "my words").unwrap();
    assert_eq!(flow.answer_for("q1"), &Answer::FreeText("my words".into()));
    assert_eq!(flow.answer_for("q1").selected_option(), None);

    assert_eq!(flow.advance().unwrap(), 1);
    assert_eq!(flow.retreat(), 0);
    assert_eq!(flow.retreat(), 0);
    assert_eq!(flow.answer_for("q1"), &Answer::FreeText("my words".into()));
}
