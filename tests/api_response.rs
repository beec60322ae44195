use deepchat::api::response::{extract_error_message, extract_reply};
use deepchat::ChatError;
use serde_json::json;

#[test]
fn test_extract_reply_with_content() {
    let response = json!({
        "choices": [{
            "message": {
                "content": "Hello, world!",
                "role": "assistant"
            }
        }]
    });

    let reply = extract_reply(&response).unwrap();
    assert_eq!(reply, "Hello, world!");
}

#[test]
fn test_extract_reply_uses_first_choice() {
    let response = json!({
        "choices": [
            {"message": {"content": "first"}},
            {"message": {"content": "second"}}
        ]
    });

    assert_eq!(extract_reply(&response).unwrap(), "first");
}

#[test]
fn test_extract_reply_without_content() {
    let response = json!({
        "choices": [{
            "message": {
                "role": "assistant"
            }
        }]
    });

    let result = extract_reply(&response);
    assert!(matches!(result, Err(ChatError::ResponseFormat(_))));
}

#[test]
fn test_extract_reply_null_content() {
    let response = json!({
        "choices": [{
            "message": {"role": "assistant", "content": null}
        }]
    });

    assert!(matches!(
        extract_reply(&response),
        Err(ChatError::ResponseFormat(_))
    ));
}

#[test]
fn test_extract_reply_empty_choices() {
    let response = json!({
        "choices": []
    });

    let result = extract_reply(&response);
    assert!(matches!(result, Err(ChatError::ResponseFormat(_))));
}

#[test]
fn test_extract_reply_missing_choices() {
    let response = json!({"id": "gen-1"});

    assert!(matches!(
        extract_reply(&response),
        Err(ChatError::ResponseFormat(_))
    ));
}

#[test]
fn test_extract_error_message_from_provider_body() {
    let body = r#"{"error": {"message": "Rate limit exceeded", "code": 429}}"#;
    assert_eq!(extract_error_message(body), "Rate limit exceeded");
}

#[test]
fn test_extract_error_message_falls_back_to_body() {
    assert_eq!(extract_error_message("  Bad Gateway \n"), "Bad Gateway");
    assert_eq!(extract_error_message(""), "Unknown error");
}
