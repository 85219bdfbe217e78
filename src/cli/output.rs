//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{MistranslateArgs, OutputFormat};
use crate::error::Result;
use crate::injection::conversation::Conversation;
use crate::injection::injector::ErrorRecord;
use crate::injection::matcher::Candidate;

/// Reports that know how to print themselves for humans.
pub trait HumanReport {
    /// Render the report as plain text lines.
    fn render_human(&self) -> String;
}

/// Result structure for single-text injection.
#[derive(Debug, Serialize, Deserialize)]
pub struct TextInjectionReport {
    pub original: String,
    pub modified: String,
    pub seed: Option<u64>,
    pub errors: Vec<ErrorRecord>,
}

/// Result structure for conversation injection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationInjectionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<Conversation>,
    pub modified: Conversation,
    pub seed: Option<u64>,
    pub errors: Vec<ErrorRecord>,
}

/// Result structure for a candidate listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateReport {
    pub text: String,
    pub candidates: Vec<Candidate>,
}

impl HumanReport for TextInjectionReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Original:  {}\n", self.original));
        out.push_str(&format!("Modified:  {}\n", self.modified));
        out.push('\n');
        out.push_str(&render_errors(&self.errors));
        out
    }
}

impl HumanReport for ConversationInjectionReport {
    fn render_human(&self) -> String {
        let mut out = String::new();

        if let Some(original) = &self.original {
            out.push_str("Original Conversation:\n");
            out.push_str("══════════════════════\n");
            out.push_str(&render_conversation(original));
            out.push('\n');
        }

        out.push_str("Conversation With Errors:\n");
        out.push_str("═════════════════════════\n");
        out.push_str(&render_conversation(&self.modified));
        out.push('\n');
        out.push_str(&render_errors(&self.errors));
        out
    }
}

impl HumanReport for CandidateReport {
    fn render_human(&self) -> String {
        if self.candidates.is_empty() {
            return "No candidates found.\n".to_string();
        }

        let mut out = format!("Candidates ({}):\n", self.candidates.len());
        for candidate in &self.candidates {
            out.push_str(&format!(
                "  {:>4}..{:<4} {:<22} '{}'\n",
                candidate.start,
                candidate.end,
                candidate.category.to_string(),
                candidate.original
            ));
        }
        out
    }
}

fn render_conversation(conversation: &Conversation) -> String {
    conversation
        .iter()
        .map(|turn| format!("{}: {}\n", turn.speaker, turn.text))
        .collect()
}

fn render_errors(errors: &[ErrorRecord]) -> String {
    if errors.is_empty() {
        return "No errors were introduced.\n".to_string();
    }

    let mut out = format!("Errors introduced ({}):\n", errors.len());
    for (i, error) in errors.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, error));
    }
    out
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReport>(
    message: &str,
    result: &T,
    args: &MistranslateArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanReport>(message: &str, result: &T, args: &MistranslateArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.render_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &MistranslateArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injection::injector::ErrorInjector;

    #[test]
    fn test_text_report_human() {
        let mut injector = ErrorInjector::new(1.0).unwrap();
        let result = injector.inject_errors("Take fifteen tablets.", Some(1));
        let report = TextInjectionReport {
            original: "Take fifteen tablets.".to_string(),
            modified: result.text,
            seed: Some(1),
            errors: result.errors,
        };

        let rendered = report.render_human();
        assert!(rendered.contains("Modified:  Take fifty tablets."));
        assert!(rendered.contains("1. position 5: number_substitution 'fifteen' -> 'fifty'"));
    }

    #[test]
    fn test_conversation_report_json_skips_original() {
        let report = ConversationInjectionReport {
            original: None,
            modified: Conversation::new().with_turn("Doctor", "Hello."),
            seed: None,
            errors: Vec::new(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("original").is_none());
        assert_eq!(json["modified"][0]["speaker"], "Doctor");
        assert!(report.render_human().contains("No errors were introduced."));
    }

    #[test]
    fn test_candidate_report_human() {
        let injector = ErrorInjector::new(0.0).unwrap();
        let report = CandidateReport {
            text: "no".to_string(),
            candidates: injector.find_candidates("no"),
        };
        let rendered = report.render_human();
        assert!(rendered.starts_with("Candidates (1):"));
        assert!(rendered.contains("qualifier_omission"));

        let empty = CandidateReport {
            text: String::new(),
            candidates: Vec::new(),
        };
        assert_eq!(empty.render_human(), "No candidates found.\n");
    }
}
