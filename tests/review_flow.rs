//! Integration tests for the submit → render → act flow against a mock
//! review service.
//!
//! Each test starts a `wiremock` server standing in for `POST /review` and
//! drives a [`UiController`] inside a `LocalSet`, the same way the CLI does.

use profile_review::controller::EventReceiver;
use profile_review::error::{INVALID_RESPONSE_MESSAGE, NO_FILE_MESSAGE, REVIEW_FAILED_MESSAGE};
use profile_review::platform::{MemoryClipboard, RecordingLinkOpener};
use profile_review::theme::THEME_KEY;
use profile_review::view::badge::BadgeTier;
use profile_review::view::document::document;
use profile_review::{
    review_file_sync, ClientConfig, FilePreferenceStore, Observer, PdfUpload, PreferenceStore,
    ReviewError, SectionId, Theme, UiController, UiEvent, UiObserver, UploadForm,
};
use serde_json::json;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tokio::task::LocalSet;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn sample_pdf() -> PdfUpload {
    PdfUpload::new("Profile.pdf", b"%PDF-1.4 sample profile".to_vec())
}

fn full_review() -> serde_json::Value {
    json!({
        "review": {
            "score": 85,
            "full_name": "Jane Doe",
            "connections": 500,
            "followers": 1200,
            "headline": {"suggestion": "Data Engineer | Rust & Kafka", "explanation": "Names the stack"},
            "about": {"suggestion": "I build reliable pipelines.", "explanation": "Leads with outcomes"},
            "experience": [{"role": "Engineer at Acme", "tips": "Quantify throughput gains"}],
            "skills": {"missing": ["Airflow", "dbt"], "notes": "Add orchestration tools"},
            "keywords": ["rust", "etl"],
            "summary": "Strong technical profile."
        }
    })
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .server_url(server.uri())
        .build()
        .unwrap()
}

/// Records loading transitions in order.
#[derive(Default)]
struct LoadingLog(Mutex<Vec<bool>>);

impl UiObserver for LoadingLog {
    fn on_loading_changed(&self, visible: bool) {
        self.0.lock().unwrap().push(visible);
    }
}

async fn submit(controller: &mut UiController, events: &mut EventReceiver, form: UploadForm) {
    controller.handle(UiEvent::Submit(form));
    controller.run_until_settled(events).await;
}

// ── Success path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_review_renders_links_and_hides_loading() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .and(body_string_contains("name=\"target_role\""))
        .and(body_string_contains("Data Engineer"))
        .and(body_string_contains("filename=\"Profile.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_review()))
        .expect(1)
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let log = Arc::new(LoadingLog::default());
            let (mut c, mut rx) = UiController::builder(config_for(&server))
                .observer(Arc::clone(&log) as Observer)
                .build()
                .unwrap();

            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "Data Engineer")).await;

            let page = c.page();
            assert_eq!(page.error(), None);
            assert!(page.result_visible);
            assert!(!page.loading.is_visible());
            assert_eq!(*log.0.lock().unwrap(), vec![true, false]);

            assert_eq!(page.score.text, "85");
            assert_eq!(page.score.tier, Some(BadgeTier::Good));
            assert_eq!(page.stats.connections, "500");
            assert_eq!(page.stats.followers, "1200");

            let cert = page.certificate.as_ref().unwrap();
            assert_eq!(
                cert.url,
                format!("{}/certificate?score=85&name=Jane%20Doe", server.uri())
            );
            assert!(page.share_url.as_deref().unwrap().contains("85%2F100"));

            let headline = page.section(SectionId::Headline).unwrap();
            assert!(headline.html.contains("Rust &amp; Kafka"));
        })
        .await;
}

#[tokio::test]
async fn copy_and_certificate_after_render() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_review()))
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let clipboard = Rc::new(MemoryClipboard::new());
            let opener = Rc::new(RecordingLinkOpener::new());
            let (mut c, mut rx) = UiController::builder(config_for(&server))
                .clipboard(Rc::clone(&clipboard))
                .link_opener(Rc::clone(&opener))
                .build()
                .unwrap();

            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;

            c.handle(UiEvent::Copy(SectionId::Keywords));
            assert_eq!(clipboard.contents().as_deref(), Some("rust etl"));
            assert_eq!(c.page().copy_button(SectionId::Keywords).unwrap().label, "Copied!");

            c.handle(UiEvent::Copy(SectionId::Headline));
            assert_eq!(clipboard.contents().as_deref(), Some("Data Engineer | Rust & Kafka"));

            c.handle(UiEvent::OpenCertificate);
            assert_eq!(opener.opened().len(), 1);
            assert!(opener.opened()[0].ends_with("/certificate?score=85&name=Jane%20Doe"));
        })
        .await;
}

#[tokio::test]
async fn review_without_optional_fields_uses_placeholders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"review": {}})))
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let (mut c, mut rx) = UiController::builder(config_for(&server)).build().unwrap();
            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;

            let page = c.page();
            assert!(page.result_visible);
            assert_eq!(page.score.text, "—");
            assert_eq!(page.score.tier, None);
            assert_eq!(page.stats.connections, "—");
            assert!(page.certificate.is_none());
            assert!(page.share_url.is_none());
            let html = document(page);
            assert!(html.contains("Not specified"));
            assert!(!html.contains("undefined"));
        })
        .await;
}

#[tokio::test]
async fn non_object_review_renders_placeholders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"review": ["not", "an", "object"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let (mut c, mut rx) = UiController::builder(config_for(&server)).build().unwrap();
            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;

            let page = c.page();
            assert!(page.result_visible);
            assert_eq!(page.error(), None);
            assert_eq!(page.score.text, "—");
            assert!(document(page).contains("Not specified"));
        })
        .await;
}

// ── Failure paths ────────────────────────────────────────────────────────────

#[tokio::test]
async fn no_file_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_review()))
        .expect(0)
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let (mut c, mut rx) = UiController::builder(config_for(&server)).build().unwrap();
            submit(&mut c, &mut rx, UploadForm::new(None, "Data Engineer")).await;

            assert_eq!(c.page().error(), Some(NO_FILE_MESSAGE));
            assert!(!c.page().loading.is_visible());
            assert!(!c.page().result_visible);
        })
        .await;
}

#[tokio::test]
async fn server_error_with_details_is_shown_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Model output was not valid JSON.",
            "details": "unexpected token at line 3"
        })))
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let log = Arc::new(LoadingLog::default());
            let (mut c, mut rx) = UiController::builder(config_for(&server))
                .observer(Arc::clone(&log) as Observer)
                .build()
                .unwrap();
            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;

            assert_eq!(
                c.page().error(),
                Some("Model output was not valid JSON.: unexpected token at line 3")
            );
            assert!(!c.page().result_visible);
            assert!(c.page().section(SectionId::Summary).is_none());
            assert_eq!(*log.0.lock().unwrap(), vec![true, false]);
        })
        .await;
}

#[tokio::test]
async fn unparseable_error_body_is_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let (mut c, mut rx) = UiController::builder(config_for(&server)).build().unwrap();
            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;
            assert_eq!(c.page().error(), Some(REVIEW_FAILED_MESSAGE));
            assert!(!c.page().loading.is_visible());
        })
        .await;
}

#[tokio::test]
async fn ok_with_html_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let (mut c, mut rx) = UiController::builder(config_for(&server)).build().unwrap();
            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;
            assert_eq!(c.page().error(), Some(INVALID_RESPONSE_MESSAGE));
            assert!(!c.page().result_visible);
        })
        .await;
}

#[tokio::test]
async fn transport_failure_shows_message_and_hides_loading() {
    LocalSet::new()
        .run_until(async {
            let config = ClientConfig::builder()
                .server_url("http://127.0.0.1:1")
                .build()
                .unwrap();
            let (mut c, mut rx) = UiController::builder(config).build().unwrap();
            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;

            let message = c.page().error().unwrap();
            assert!(!message.trim().is_empty());
            assert!(!c.page().loading.is_visible());
            assert!(!c.page().result_visible);
        })
        .await;
}

#[tokio::test]
async fn next_submission_clears_previous_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "No file uploaded."})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_review()))
        .mount(&server)
        .await;

    LocalSet::new()
        .run_until(async {
            let (mut c, mut rx) = UiController::builder(config_for(&server)).build().unwrap();

            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;
            assert_eq!(c.page().error(), Some("No file uploaded."));

            submit(&mut c, &mut rx, UploadForm::new(Some(sample_pdf()), "")).await;
            assert_eq!(c.page().error(), None);
            assert!(c.page().result_visible);
        })
        .await;
}

// ── Theme persistence ────────────────────────────────────────────────────────

#[tokio::test]
async fn theme_toggle_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("preferences.json");
    let config = ClientConfig::builder()
        .preferences_path(&prefs)
        .build()
        .unwrap();

    let (mut c, _rx) = UiController::builder(config.clone())
        .system_theme(Theme::Light)
        .build()
        .unwrap();
    assert_eq!(c.page().theme, Theme::Light);

    c.handle(UiEvent::ToggleTheme);
    assert_eq!(c.page().theme, Theme::Dark);
    assert_eq!(FilePreferenceStore::new(&prefs).get(THEME_KEY).as_deref(), Some("dark"));

    // A fresh controller picks the stored value over the system theme.
    let (restarted, _rx) = UiController::builder(config)
        .system_theme(Theme::Light)
        .build()
        .unwrap();
    assert_eq!(restarted.page().theme, Theme::Dark);
    assert!(document(restarted.page()).contains("data-theme=\"dark\""));

    c.handle(UiEvent::ToggleTheme);
    assert_eq!(c.page().theme, Theme::Light);
    assert_eq!(FilePreferenceStore::new(&prefs).get(THEME_KEY).as_deref(), Some("light"));
}

// ── One-shot API ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn review_file_sync_reads_and_uploads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review"))
        .and(body_string_contains("Backend Engineer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_review()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("Profile.pdf");
    std::fs::write(&pdf, b"%PDF-1.4 sample profile").unwrap();

    // The sync wrapper builds its own runtime, so it must run off this one.
    let config = config_for(&server);
    let outcome = std::thread::spawn(move || review_file_sync(&pdf, "Backend Engineer", &config))
        .join()
        .unwrap();

    let review = assert_ok!(outcome);
    assert_eq!(review.score, Some(85.0));
    assert_eq!(review.display_name(), Some("Jane Doe"));
    assert_eq!(review.keywords, vec!["rust", "etl"]);
}

#[test]
fn review_file_sync_missing_file_is_local_error() {
    let err = assert_err!(review_file_sync("/no/such/Profile.pdf", "", &ClientConfig::default()));
    assert!(matches!(err, ReviewError::FileUnreadable { .. }));
    assert!(err.is_local());
}
