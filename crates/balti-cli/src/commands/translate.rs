use balti_core::{TranslationDirection, WordEntry};
use serde::Serialize;

use crate::commands::common::{format_word_lines, Backend};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct TranslationOutput {
    pub direction: TranslationDirection,
    pub input: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<WordEntry>>,
}

pub async fn run_translate(
    text_parts: &[String],
    direction: TranslationDirection,
    show_matches: bool,
    as_json: bool,
    backend: &Backend,
) -> Result<(), CliError> {
    let input = text_parts.join(" ");
    if input.trim().is_empty() {
        return Err(CliError::EmptyTranslationInput);
    }

    let translator = backend.translation_controller();
    if let Err(error) = translator.load_dictionary().await {
        eprintln!("Warning: could not load the dictionary ({error}); words will stay untranslated");
    }
    if translator.direction() != direction {
        translator.toggle_direction();
    }
    translator.set_input(input.clone());
    let output = translator.translate().await?;
    let matches = show_matches.then(|| translator.matches());

    if as_json {
        let payload = TranslationOutput {
            direction,
            input,
            output,
            matches,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{output}");
    if let Some(matches) = matches {
        if !matches.is_empty() {
            println!();
            println!("Matching words:");
            for line in format_word_lines(&matches) {
                println!("  {line}");
            }
        }
    }
    Ok(())
}
