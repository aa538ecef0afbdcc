use mockito::Matcher;
use replytui::clipboard::{Clipboard, ClipboardError};
use replytui::composer::{
    Action, COPIED_MESSAGE, Composer, EMPTY_CONTENT_MESSAGE, Effect, GENERATED_MESSAGE, Status,
};
use replytui::service::{GenerateRequest, HttpReplyService, ReplyService, ServiceError, Tone};
use serde_json::json;
use std::cell::RefCell;

const PATH: &str = "/api/email/generate";

/// Clipboard that remembers what it was given
#[derive(Default)]
struct MemoryClipboard {
    contents: RefCell<Option<String>>,
    deny: bool,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Rejected("permission denied".to_string()));
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Run one generate attempt to completion, returning whether a request went out
async fn generate(composer: &mut Composer, service: &dyn ReplyService) -> bool {
    match composer.update(Action::Generate) {
        Some(Effect::SendRequest(request)) => {
            assert!(composer.is_loading());
            let outcome = service.generate(&request).await;
            composer.update(Action::GenerateFinished(outcome));
            true
        }
        Some(other) => panic!("unexpected effect {:?}", other),
        None => false,
    }
}

fn copy(composer: &mut Composer, clipboard: &impl Clipboard) {
    if let Some(Effect::WriteClipboard(text)) = composer.update(Action::Copy) {
        let outcome = clipboard.write_text(&text);
        composer.update(Action::CopyFinished(outcome));
    }
}

fn composer_with(content: &str, tone: Tone) -> Composer {
    let mut composer = Composer::new(tone);
    composer.update(Action::SetEmailContent(content.to_string()));
    composer
}

#[tokio::test]
async fn friendly_reply_is_shown_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "emailContent": "Hi, are you available tomorrow?",
            "tone": "friendly"
        })))
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("Sure, tomorrow works great!")
        .create_async()
        .await;

    let service = HttpReplyService::new(format!("{}{}", server.url(), PATH));
    let mut composer = composer_with("Hi, are you available tomorrow?", Tone::Friendly);

    assert!(generate(&mut composer, &service).await);

    mock.assert_async().await;
    assert_eq!(composer.generated_reply(), "Sure, tomorrow works great!");
    assert_eq!(
        composer.status(),
        Some(&Status::Info(GENERATED_MESSAGE.to_string()))
    );
    assert!(!composer.is_loading());
}

#[tokio::test]
async fn blank_draft_never_reaches_the_service() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .expect(0)
        .create_async()
        .await;

    let service = HttpReplyService::new(format!("{}{}", server.url(), PATH));
    for input in ["", "   \n\t"] {
        let mut composer = composer_with(input, Tone::Casual);
        assert!(!generate(&mut composer, &service).await);
        assert!(!generate(&mut composer, &service).await);
        assert_eq!(
            composer.status(),
            Some(&Status::Info(EMPTY_CONTENT_MESSAGE.to_string()))
        );
        assert_eq!(composer.generated_reply(), "");
        assert!(!composer.is_loading());
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_is_reported_without_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::PartialJson(json!({ "tone": "urgent" })))
        .with_status(500)
        .with_body("stack trace the user should not see")
        .create_async()
        .await;

    let service = HttpReplyService::new(format!("{}{}", server.url(), PATH));
    let mut composer = composer_with("Need a quote by Friday", Tone::Urgent);

    assert!(generate(&mut composer, &service).await);

    mock.assert_async().await;
    assert_eq!(composer.generated_reply(), "");
    assert!(!composer.is_loading());
    let status = composer.status().expect("status set");
    assert!(status.is_error());
    assert!(status.text().starts_with("Error: "));
    assert!(status.text().contains("Server error"));
    assert!(!status.text().contains("stack trace"));
}

#[tokio::test]
async fn any_non_success_status_is_a_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(404)
        .create_async()
        .await;

    let service = HttpReplyService::new(format!("{}{}", server.url(), PATH));
    let request = GenerateRequest {
        email_content: "hello".to_string(),
        tone: Tone::Formal,
    };
    assert_eq!(
        service.generate(&request).await,
        Err(ServiceError::Server { status: 404 })
    );
}

#[tokio::test]
async fn reply_body_is_not_trimmed() {
    let mut server = mockito::Server::new_async().await;
    let body = "\n  Dear Sam,\n\n  Thanks.  \n";
    let _mock = server
        .mock("POST", PATH)
        .with_status(201)
        .with_body(body)
        .create_async()
        .await;

    let service = HttpReplyService::new(format!("{}{}", server.url(), PATH));
    let mut composer = composer_with("  hello  ", Tone::Professional);
    assert!(generate(&mut composer, &service).await);
    assert_eq!(composer.generated_reply(), body);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Nothing listens on port 1
    let service = HttpReplyService::new("http://127.0.0.1:1/api/email/generate");
    let mut composer = composer_with("hello", Tone::Professional);

    assert!(generate(&mut composer, &service).await);

    assert_eq!(composer.generated_reply(), "");
    assert!(!composer.is_loading());
    let status = composer.status().expect("status set");
    assert!(status.is_error());
    assert!(status.text().ends_with("Make sure your backend is running."));
}

#[tokio::test]
async fn generated_reply_can_be_copied() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("Thanks, see you then.")
        .create_async()
        .await;

    let service = HttpReplyService::new(format!("{}{}", server.url(), PATH));
    let mut composer = composer_with("See you at 3?", Tone::Casual);
    assert!(generate(&mut composer, &service).await);

    let clipboard = MemoryClipboard::default();
    copy(&mut composer, &clipboard);

    assert_eq!(
        clipboard.contents.borrow().as_deref(),
        Some("Thanks, see you then.")
    );
    assert_eq!(
        composer.status(),
        Some(&Status::Info(COPIED_MESSAGE.to_string()))
    );
}

#[test]
fn copy_without_reply_touches_nothing() {
    let clipboard = MemoryClipboard::default();
    let mut composer = Composer::default();
    copy(&mut composer, &clipboard);
    assert!(clipboard.contents.borrow().is_none());
    assert!(composer.status().is_none());
}

#[tokio::test]
async fn denied_clipboard_keeps_the_reply() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("Noted.")
        .create_async()
        .await;

    let service = HttpReplyService::new(format!("{}{}", server.url(), PATH));
    let mut composer = composer_with("FYI", Tone::Formal);
    assert!(generate(&mut composer, &service).await);

    let clipboard = MemoryClipboard {
        deny: true,
        ..Default::default()
    };
    copy(&mut composer, &clipboard);

    assert!(composer.status().unwrap().is_error());
    assert_eq!(composer.generated_reply(), "Noted.");
}
