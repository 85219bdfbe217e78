//! Command implementations for the mistranslate CLI.

use anyhow::Context;
use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::injection::conversation::Conversation;
use crate::injection::injector::ErrorInjector;
use crate::injection::overrides::TableOverrides;

/// Execute a CLI command.
pub fn execute_command(args: MistranslateArgs) -> Result<()> {
    let mut injector = build_injector(&args)?;

    match &args.command {
        Command::Text(text_args) => inject_text(text_args, &mut injector, &args),
        Command::Conversation(conversation_args) => {
            inject_conversation(conversation_args, &mut injector, &args)
        }
        Command::Candidates(candidates_args) => list_candidates(candidates_args, &injector, &args),
    }
}

/// Create the injector from the global flags and apply any table overrides.
pub fn build_injector(args: &MistranslateArgs) -> Result<ErrorInjector> {
    let mut injector = ErrorInjector::with_config(args.injector_config())?;

    if let Some(path) = &args.tables {
        info!("Loading table overrides from: {}", path.display());
        let overrides = TableOverrides::load_from_file(path)?;
        injector.apply_overrides(overrides)?;
    }

    debug!(
        "injector ready: probability {}, {} table entries",
        injector.error_probability(),
        injector.tables().total_entries()
    );

    Ok(injector)
}

/// Inject errors into a single text.
fn inject_text(
    args: &TextArgs,
    injector: &mut ErrorInjector,
    cli_args: &MistranslateArgs,
) -> Result<()> {
    let result = injector.inject_errors(&args.text, cli_args.seed);

    output_result(
        "Text injection complete",
        &TextInjectionReport {
            original: args.text.clone(),
            modified: result.text,
            seed: cli_args.seed,
            errors: result.errors,
        },
        cli_args,
    )
}

/// Inject errors into a conversation file.
fn inject_conversation(
    args: &ConversationArgs,
    injector: &mut ErrorInjector,
    cli_args: &MistranslateArgs,
) -> Result<()> {
    info!("Reading conversation from: {}", args.conversation_file.display());

    let content = std::fs::read_to_string(&args.conversation_file).with_context(|| {
        format!(
            "failed to read conversation file '{}'",
            args.conversation_file.display()
        )
    })?;
    let conversation = Conversation::from_json_str(&content)?;

    let result = injector.inject_errors_in_conversation(&conversation, cli_args.seed)?;

    output_result(
        "Conversation injection complete",
        &ConversationInjectionReport {
            original: (!args.modified_only).then_some(conversation),
            modified: result.conversation,
            seed: cli_args.seed,
            errors: result.errors,
        },
        cli_args,
    )
}

/// List candidates without applying them.
fn list_candidates(
    args: &CandidatesArgs,
    injector: &ErrorInjector,
    cli_args: &MistranslateArgs,
) -> Result<()> {
    output_result(
        "Candidate scan complete",
        &CandidateReport {
            text: args.text.clone(),
            candidates: injector.find_candidates(&args.text),
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::MistranslateError;
    use crate::injection::category::ErrorType;

    #[test]
    fn test_build_injector_with_overrides() {
        let mut tables = NamedTempFile::new().unwrap();
        write!(tables, r#"{{"temporal": {{"daily": "weekly"}}}}"#).unwrap();
        let path = tables.path().to_str().unwrap().to_string();

        let args = MistranslateArgs::try_parse_from([
            "mistranslate",
            "-p",
            "0.4",
            "--tables",
            path.as_str(),
            "candidates",
            "daily",
        ])
        .unwrap();

        let injector = build_injector(&args).unwrap();
        assert_eq!(injector.error_probability(), 0.4);
        assert!(injector.table(ErrorType::TemporalSubstitution).contains("daily"));
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let args =
            MistranslateArgs::try_parse_from(["mistranslate", "-p", "1.5", "text", "x"]).unwrap();
        let err = execute_command(args).unwrap_err();
        assert!(matches!(err, MistranslateError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_conversation_file() {
        let args = MistranslateArgs::try_parse_from([
            "mistranslate",
            "-q",
            "conversation",
            "/nonexistent/visit.json",
        ])
        .unwrap();
        let err = execute_command(args).unwrap_err();
        assert!(err.to_string().contains("failed to read conversation file"));
    }

    #[test]
    fn test_conversation_command_runs() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"speaker": "Doctor", "text": "Take it before meals."}}]"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = MistranslateArgs::try_parse_from([
            "mistranslate",
            "-f",
            "json",
            "-p",
            "1.0",
            "-s",
            "3",
            "conversation",
            path.as_str(),
        ])
        .unwrap();
        assert!(execute_command(args).is_ok());
    }
}
