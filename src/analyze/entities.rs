use crate::entry::NamedEntity;
use crate::error::OracleError;
use crate::nlp::EntityRecognizer;

/// Entities of the raw text, exactly as the recognizer reports them.
/// Capitalisation and punctuation matter to recognizers, so this must never
/// see normalized text.
pub fn recognize_entities(
    raw_text: &str,
    recognizer: &dyn EntityRecognizer,
) -> Result<Vec<NamedEntity>, OracleError> {
    recognizer.recognize(raw_text)
}
