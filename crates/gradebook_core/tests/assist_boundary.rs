use gradebook_core::{parse_reply, ExtractError, ExtractedReply, RequestGuard, TextExtractor};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct StudentDraft {
    name: String,
    grade_level: String,
}

/// Canned host extractor returning a fixed reply per instruction.
struct CannedExtractor {
    reply: Result<String, ExtractError>,
}

impl TextExtractor for CannedExtractor {
    fn extract(&self, _instruction: &str, _attachment: Option<&[u8]>) -> Result<String, ExtractError> {
        self.reply.clone()
    }
}

#[test]
fn superseded_request_result_is_discarded() {
    let guard = RequestGuard::new();
    let extractor = CannedExtractor {
        reply: Ok(r#"{"name":"Alice","grade_level":"10th"}"#.to_string()),
    };

    // First request dispatched, then superseded before its reply lands.
    let stale_token = guard.begin();
    let stale_reply = extractor.extract("fill the student form", None).unwrap();

    let fresh_token = guard.begin();
    let fresh_reply = extractor.extract("fill the student form", None).unwrap();

    // The stale reply arrives late; the guard rejects it.
    assert!(!guard.accept(stale_token));
    assert!(guard.accept(fresh_token));

    let parsed = parse_reply::<StudentDraft>(&fresh_reply);
    assert_eq!(
        parsed,
        ExtractedReply::Structured(StudentDraft {
            name: "Alice".to_string(),
            grade_level: "10th".to_string(),
        })
    );
    let _ = stale_reply;
}

#[test]
fn extractor_errors_stay_opaque_and_local() {
    let extractor = CannedExtractor {
        reply: Err(ExtractError::new("upstream unavailable")),
    };

    let err = extractor.extract("summarize", None).unwrap_err();
    assert_eq!(err.message(), "upstream unavailable");
    assert!(err.to_string().contains("extraction failed"));
}

#[test]
fn unstructured_reply_is_preserved_as_plain_text() {
    let extractor = CannedExtractor {
        reply: Ok("The student seems to be named Alice.".to_string()),
    };

    let reply = extractor.extract("fill the student form", None).unwrap();
    let parsed = parse_reply::<StudentDraft>(&reply);
    assert_eq!(
        parsed,
        ExtractedReply::PlainText("The student seems to be named Alice.".to_string())
    );
}
