use std::fs;

use samvidhan::chat::{ChatTranscript, FALLBACK, GREETING};
use samvidhan::error::ApiError;
use samvidhan::model::{Author, RagAnswer};

#[test]
fn test_blank_input_is_ignored() {
    let mut chat = ChatTranscript::new();
    assert!(chat.send("").is_none());
    assert!(chat.send("   \t ").is_none());
    assert_eq!(chat.messages().len(), 1);
    assert_eq!(chat.messages()[0].text, GREETING);
    assert!(!chat.is_pending());
}

#[test]
fn test_failure_appends_one_fallback() {
    let mut chat = ChatTranscript::new();
    assert_eq!(chat.send("What is Article 21?").as_deref(), Some("What is Article 21?"));
    assert!(chat.is_pending());

    chat.receive(Err(ApiError::Transport("connection refused".into())));
    assert!(!chat.is_pending());
    let texts: Vec<&str> = chat.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec![GREETING, "What is Article 21?", FALLBACK]);
    assert_eq!(chat.messages()[2].author, Author::Assistant);
}

#[test]
fn test_answer_keeps_sources() {
    let content = fs::read_to_string("fixtures/rag_answer.json").expect("Cannot read fixture");
    let answer: RagAnswer = serde_json::from_str(&content).unwrap();

    let mut chat = ChatTranscript::new();
    chat.send("Tell me about personal liberty");
    chat.receive(Ok(answer));

    let reply = chat.messages().last().unwrap();
    assert!(reply.text.starts_with("**Article 21**"));
    assert_eq!(
        reply.sources,
        vec![
            "Article 21 - Protection of life and personal liberty".to_string(),
            "Article 22 - Protection against arrest and detention in certain cases".to_string(),
        ]
    );
}

#[test]
fn test_message_ids_increase() {
    let mut chat = ChatTranscript::new();
    chat.send("first");
    chat.receive(Err(ApiError::Decode("bad".into())));
    chat.send("second");
    let ids: Vec<u64> = chat.messages().iter().map(|m| m.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}
