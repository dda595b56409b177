use serde_json::Value;

use crate::data_structs::student_enrollment::{
    NewEnrollment, ENROLLMENT_NUMBER_MAX_LEN, FULL_NAME_MAX_LEN, OFFER_NAME_MAX_LEN, OFFER_SHIFT_MAX_LEN,
};
use crate::error::WebhookError;

// (dotted path for error messages, json pointer, column width)
const ENROLLMENT_NUMBER: (&str, &str, usize) = ("dados.NumeroInscricao", "/dados/NumeroInscricao", ENROLLMENT_NUMBER_MAX_LEN);
const OFFER_NAME: (&str, &str, usize) = ("dados.Oferta.Nome", "/dados/Oferta/Nome", OFFER_NAME_MAX_LEN);
const OFFER_SHIFT: (&str, &str, usize) = ("dados.Oferta.TurnoOfertado", "/dados/Oferta/TurnoOfertado", OFFER_SHIFT_MAX_LEN);
const FULL_NAME: (&str, &str, usize) = ("dados.LeadReferencia.Nome", "/dados/LeadReferencia/Nome", FULL_NAME_MAX_LEN);

/// Pulls the enrollment tuple out of a delivered event:
///
/// ```text
/// { "dados": {
///     "NumeroInscricao": "...",
///     "Oferta": { "Nome": "...", "TurnoOfertado": "..." },
///     "LeadReferencia": { "Nome": "..." } } }
/// ```
///
/// Anything else in the payload is ignored here and echoed untouched by the handler.
pub fn decode_enrollment(payload: &Value) -> Result<NewEnrollment, WebhookError> {
    Ok(NewEnrollment {
        enrollment_number: string_at(payload, ENROLLMENT_NUMBER)?,
        offer_name: string_at(payload, OFFER_NAME)?,
        offer_shift: string_at(payload, OFFER_SHIFT)?,
        full_name: string_at(payload, FULL_NAME)?,
    })
}

fn string_at(payload: &Value, (path, pointer, max): (&'static str, &str, usize)) -> Result<String, WebhookError> {
    let value = match payload.pointer(pointer) {
        Some(value) => value,
        None => return Err(WebhookError::MissingField { path })
    };
    let value = match value.as_str() {
        Some(value) => value,
        None => return Err(WebhookError::InvalidField { path })
    };

    // varchar widths count characters, not bytes
    let actual = value.chars().count();
    if actual > max {
        return Err(WebhookError::FieldTooLong { path, max, actual });
    }

    Ok(value.to_string())
}
