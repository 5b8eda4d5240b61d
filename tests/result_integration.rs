//! Integration tests for the result screen
//!
//! Tests share-link round trips, routing, localisation and exports

mod common;

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::path::Path;

use common::MockConfig;
use tetotype::core::result_view::LINE_BREAK;
use tetotype::core::{
    build_share_link, copy_text, decode_share_link, localize, share_result, Clipboard, Exporter, HttpBackend,
    PreferenceStore, ResultView, Route, ShareOutcome, SnapshotRenderer, TranslationStore,
};
use tetotype::types::{Language, PersonalityType, SurveyError, SurveyResult, Theme, TypeResult};

fn sample() -> TypeResult {
    TypeResult {
        kind: PersonalityType::TetoBoy,
        explanation: "You are a TETO-BOY.\nConfident.".into(),
        advice: "Meet an egen-girl.".into(),
        love_chain_info: "teto-boy ♥ egen-girl".into(),
    }
}

async fn korean_store() -> TranslationStore {
    let (base, _) = common::spawn(MockConfig::default()).await;
    let mut store = TranslationStore::new(Language::Ko, PreferenceStore::disabled());
    store.load(&HttpBackend::new(base), Language::Ko).await;
    store
}

#[derive(Default)]
struct MemoryClipboard(RefCell<Vec<String>>);

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> SurveyResult<()> {
        self.0.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Writes a fake PNG where the renderer is told to
struct FakeRenderer;

impl SnapshotRenderer for FakeRenderer {
    fn render(&self, html_path: &Path, png_path: &Path) -> SurveyResult<()> {
        let html = std::fs::read_to_string(html_path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        std::fs::write(png_path, b"\x89PNG\r\n\x1a\n").unwrap();
        Ok(())
    }
}

struct FailingRenderer;

impl SnapshotRenderer for FailingRenderer {
    fn render(&self, _html_path: &Path, _png_path: &Path) -> SurveyResult<()> {
        Err(SurveyError::ExportError("renderer missing".into()))
    }
}

#[tokio::test]
async fn test_share_link_round_trip_localizes_identically() {
    let i18n = korean_store().await;
    let result = sample();

    let link = build_share_link("https://coni.myds.me", "/", &result).unwrap();
    let decoded = decode_share_link(&link).unwrap().unwrap();
    assert_eq!(decoded, result);
    assert_eq!(
        localize(&decoded.explanation, decoded.kind, &i18n),
        localize(&result.explanation, result.kind, &i18n)
    );
}

#[tokio::test]
async fn test_localize_uses_translated_type_names() {
    let i18n = korean_store().await;
    let result = sample();

    assert_eq!(
        localize(&result.explanation, result.kind, &i18n),
        format!("You are a 테토남.{}Confident.", LINE_BREAK)
    );
    // No translation for egen-girl: identifier kept
    assert_eq!(localize(&result.love_chain_info, result.kind, &i18n), "테토남 ♥ egen-girl");
}

#[test]
fn test_shared_link_routes_to_result() {
    let link = build_share_link("https://coni.myds.me", "/app", &sample()).unwrap();
    assert!(link.starts_with("https://coni.myds.me/app#/result?data="));
    assert_eq!(Route::from_location(&link), Route::Result(Some(sample())));
}

#[test]
fn test_corrupt_link_routes_to_not_found() {
    assert_eq!(
        Route::from_location("https://coni.myds.me/#/result?data=eyJ0eXBlIjo"),
        Route::Result(None)
    );
}

#[tokio::test]
async fn test_copy_text_has_no_markup() {
    let i18n = korean_store().await;
    let result = sample();
    let clipboard = MemoryClipboard::default();

    copy_text(&ResultView::new(&result, &i18n), &clipboard).unwrap();

    let copied = clipboard.0.borrow();
    assert!(copied[0].contains("You are a 테토남.\nConfident."));
    assert!(copied[0].contains("\n\n[Advice:]\n"));
    assert!(!copied[0].contains(LINE_BREAK));
}

#[test]
fn test_share_without_native_copies_link() {
    let clipboard = MemoryClipboard::default();
    let link = build_share_link("https://coni.myds.me", "/", &sample()).unwrap();

    let outcome = share_result("Your Type", &link, None, &clipboard);
    assert_eq!(outcome, ShareOutcome::Copied(link.clone()));
    assert_eq!(clipboard.0.borrow().as_slice(), [link]);
}

#[test]
fn test_file_exports() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = TranslationStore::new(Language::En, PreferenceStore::disabled());
    let result = sample();
    let view = ResultView::new(&result, &i18n);
    let exporter = Exporter::new(dir.path().join("out"), Theme::Light);

    let json_path = exporter.save_json(&result).unwrap();
    assert_eq!(json_path.file_name().unwrap(), "result.json");
    let saved: TypeResult = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(saved, result);

    let html_path = exporter.save_html(&view).unwrap();
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("<h2>Your Type Is...</h2>"));
    assert!(html.contains("You are a teto-boy.<br>Confident."));

    let png_path = exporter.save_image(&view, &FakeRenderer).unwrap();
    assert_eq!(png_path.file_name().unwrap(), "result.png");
    // The intermediate snapshot is cleaned up
    assert!(!dir.path().join("out").join(".result-snapshot.html").exists());
}

#[test]
fn test_image_export_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = TranslationStore::new(Language::En, PreferenceStore::disabled());
    let result = sample();
    let exporter = Exporter::new(dir.path(), Theme::Dark);

    let err = exporter
        .save_image(&ResultView::new(&result, &i18n), &FailingRenderer)
        .unwrap_err();
    assert!(matches!(err, SurveyError::ExportError(_)));
    assert!(!dir.path().join("result.png").exists());
}
