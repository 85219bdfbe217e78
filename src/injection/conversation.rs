//! Speaker-tagged conversations.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MistranslateError, Result};

/// One speaker-attributed utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: String,
    pub text: String,
}

impl Turn {
    pub fn new<S: Into<String>, T: Into<String>>(speaker: S, text: T) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// An ordered sequence of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Builder-style append.
    pub fn with_turn<S: Into<String>, T: Into<String>>(mut self, speaker: S, text: T) -> Self {
        self.turns.push(Turn::new(speaker, text));
        self
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }

    /// Check every turn has a non-blank speaker label.
    pub fn validate(&self) -> Result<()> {
        for (index, turn) in self.turns.iter().enumerate() {
            if turn.speaker.trim().is_empty() {
                return Err(MistranslateError::conversation(format!(
                    "turn {index} has an empty speaker"
                )));
            }
        }
        Ok(())
    }

    /// Build a conversation from a JSON array of `{"speaker": ..., "text": ...}`
    /// objects, reporting the first malformed turn by index.
    pub fn from_value(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            MistranslateError::conversation("expected a JSON array of turns")
        })?;

        let mut turns = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let object = item.as_object().ok_or_else(|| {
                MistranslateError::conversation(format!("turn {index} is not an object"))
            })?;
            let speaker = string_field(object, "speaker", index)?;
            let text = string_field(object, "text", index)?;
            turns.push(Turn::new(speaker, text));
        }

        let conversation = Self { turns };
        conversation.validate()?;
        Ok(conversation)
    }

    /// Parse a conversation from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Load a conversation from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| match e {
            MistranslateError::Conversation(msg) => MistranslateError::conversation(format!(
                "{}: {msg}",
                path.display()
            )),
            other => other,
        })
    }
}

fn string_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &str,
    index: usize,
) -> Result<&'a str> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(MistranslateError::conversation(format!(
            "turn {index} field '{field}' is not a string"
        ))),
        None => Err(MistranslateError::conversation(format!(
            "turn {index} is missing the '{field}' field"
        ))),
    }
}

impl FromIterator<Turn> for Conversation {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl IntoIterator for Conversation {
    type Item = Turn;
    type IntoIter = std::vec::IntoIter<Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.into_iter()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_accessors() {
        let conversation = Conversation::new()
            .with_turn("Doctor", "Do you have hypertension?")
            .with_turn("Patient", "Yes.");
        assert_eq!(conversation.len(), 2);
        assert!(!conversation.is_empty());
        assert_eq!(conversation.turns()[1].speaker, "Patient");
        assert!(conversation.validate().is_ok());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"speaker": "Doctor", "text": "Good morning."},
            {"speaker": "Patient", "text": ""}
        ]"#;
        let conversation = Conversation::from_json_str(json).unwrap();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.turns()[0], Turn::new("Doctor", "Good morning."));
    }

    #[test]
    fn test_missing_fields_are_structural_errors() {
        let err = Conversation::from_json_str(r#"[{"speaker": "Doctor"}]"#).unwrap_err();
        assert!(matches!(err, MistranslateError::Conversation(_)));
        assert!(err.to_string().contains("turn 0"));
        assert!(err.to_string().contains("'text'"));

        let err = Conversation::from_json_str(r#"[{"speaker": "A", "text": "x"}, {"text": "y"}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("turn 1"));
        assert!(err.to_string().contains("'speaker'"));

        let err = Conversation::from_json_str(r#"[{"speaker": 3, "text": "y"}]"#).unwrap_err();
        assert!(err.to_string().contains("not a string"));

        let err = Conversation::from_json_str(r#"{"speaker": "A", "text": "y"}"#).unwrap_err();
        assert!(matches!(err, MistranslateError::Conversation(_)));
    }

    #[test]
    fn test_blank_speaker_rejected() {
        let conversation =
            Conversation::from(vec![Turn::new("Doctor", "hi"), Turn::new("  ", "hello")]);
        let err = conversation.validate().unwrap_err();
        assert_eq!(err.to_string(), "Conversation error: turn 1 has an empty speaker");
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let err = Conversation::from_json_str("[").unwrap_err();
        assert!(matches!(err, MistranslateError::Json(_)));
    }

    #[test]
    fn test_serde_shape() {
        let conversation = Conversation::new().with_turn("Nurse", "Stop the drip.");
        let json = serde_json::to_string(&conversation).unwrap();
        assert_eq!(json, r#"[{"speaker":"Nurse","text":"Stop the drip."}]"#);
    }
}
