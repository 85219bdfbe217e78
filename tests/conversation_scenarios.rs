//! Conversation-level injection scenarios.

use std::io::Write;

use mistranslate::prelude::*;
use tempfile::NamedTempFile;

fn consultation() -> Conversation {
    Conversation::new()
        .with_turn("Doctor", "Good morning. I see from your chart that you have hypertension.")
        .with_turn("Patient", "Yes, I take fifteen milligrams every morning before breakfast.")
        .with_turn("Doctor", "Have you noticed any symptoms like infection or inflammation?")
        .with_turn("Patient", "No, I have not had any symptoms. My chronic pain is better now.")
        .with_turn(
            "Doctor",
            "Continue taking your medication and we will increase the dose if needed.",
        )
}

#[test]
fn test_structure_and_speakers_preserved() -> Result<()> {
    let conversation = consultation();
    let mut injector = ErrorInjector::new(0.5)?;
    let result = injector.inject_errors_in_conversation(&conversation, Some(456))?;

    assert_eq!(result.conversation.len(), conversation.len());
    for (original, modified) in conversation.iter().zip(result.conversation.iter()) {
        assert_eq!(original.speaker, modified.speaker);
    }
    Ok(())
}

#[test]
fn test_turn_indices_match_producing_turn() -> Result<()> {
    let conversation = consultation();
    let mut injector = ErrorInjector::new(1.0)?;
    let result = injector.inject_errors_in_conversation(&conversation, Some(1))?;

    let mut last_turn = 0;
    for record in &result.errors {
        let turn = record.turn_index().expect("conversation records carry a turn index");
        assert!(turn < conversation.len());
        assert!(turn >= last_turn, "records are turn-ordered");
        last_turn = turn;

        let source = &conversation.turns()[turn].text;
        let found: String = source
            .chars()
            .skip(record.position())
            .take(record.original().chars().count())
            .collect();
        assert_eq!(found, record.original());
    }
    Ok(())
}

#[test]
fn test_conversation_matches_per_turn_injection() -> Result<()> {
    // One reseed for the whole conversation: the per-turn results equal a
    // sequence of unseeded calls after a single reseed.
    let conversation = consultation();
    let mut injector = ErrorInjector::new(0.4)?;
    let whole = injector.inject_errors_in_conversation(&conversation, Some(99))?;

    injector.reseed(99);
    let mut texts = Vec::new();
    for turn in &conversation {
        texts.push(injector.inject_errors(&turn.text, None).text);
    }

    let whole_texts: Vec<String> = whole.conversation.iter().map(|t| t.text.clone()).collect();
    assert_eq!(whole_texts, texts);
    Ok(())
}

#[test]
fn test_conversation_reproducible() -> Result<()> {
    let conversation = consultation();
    let mut injector = ErrorInjector::new(0.3)?;
    let first = injector.inject_errors_in_conversation(&conversation, Some(42))?;
    let second = injector.inject_errors_in_conversation(&conversation, Some(42))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_malformed_conversation_rejected_before_processing() {
    let json = r#"[
        {"speaker": "Doctor", "text": "Any allergy?"},
        {"speaker": "Patient"}
    ]"#;
    let err = Conversation::from_json_str(json).unwrap_err();
    assert!(matches!(err, MistranslateError::Conversation(_)));

    let conversation =
        Conversation::from(vec![Turn::new("Doctor", "hypertension"), Turn::new(" ", "x")]);
    let mut injector = ErrorInjector::new(1.0).unwrap();
    let err = injector
        .inject_errors_in_conversation(&conversation, Some(1))
        .unwrap_err();
    assert!(matches!(err, MistranslateError::Conversation(_)));
}

#[test]
fn test_empty_conversation() -> Result<()> {
    let mut injector = ErrorInjector::new(1.0)?;
    let result = injector.inject_errors_in_conversation(&Conversation::new(), Some(1))?;
    assert!(result.conversation.is_empty());
    assert!(result.errors.is_empty());
    Ok(())
}

#[test]
fn test_load_conversation_and_overrides_from_files() -> Result<()> {
    let mut conversation_file = NamedTempFile::new()?;
    write!(
        conversation_file,
        r#"[{{"speaker": "Pharmacist", "text": "Take one tablet daily."}}]"#
    )?;
    let mut tables_file = NamedTempFile::new()?;
    write!(tables_file, r#"{{"temporal": {{"daily": ["weekly"]}}}}"#)?;

    let conversation = Conversation::load_from_file(conversation_file.path())?;
    let mut injector = ErrorInjector::with_config(InjectorConfig::new(1.0).with_seed(5))?;
    injector.load_overrides(tables_file.path())?;

    let result = injector.inject_errors_in_conversation(&conversation, None)?;
    assert_eq!(result.conversation.turns()[0].text, "Take one capsule weekly.");
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors.iter().all(|e| e.turn_index() == Some(0)));
    Ok(())
}
