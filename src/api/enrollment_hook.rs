use actix_web::{HttpResponse, web};
use log::{error, info, warn};
use serde_json::Value;

use crate::data_structs::requests::enrollment_event::decode_enrollment;
use crate::error::WebhookError;
use crate::SharedResources;

/// Receives an enrollment event, records the student once per enrollment
/// tuple and echoes the payload back. The caller gets the same 200 body
/// whether the student was new or already known.
///
/// Registered for GET and POST (see `api::configure`). There is no signature
/// or token check on this route.
pub async fn enrollment_event(data: web::Data<SharedResources>, payload: web::Bytes) -> Result<HttpResponse, WebhookError> {
    match handle_event(&data, &payload).await {
        Ok(event) => Ok(HttpResponse::Ok().json(event)),
        Err(err) => {
            match &err {
                WebhookError::StoreUnavailable(cause) => error!("Could not record enrollment: {}", cause),
                _ => warn!("Rejected enrollment event: {}", err)
            }
            Err(err)
        }
    }
}

async fn handle_event(data: &SharedResources, payload: &[u8]) -> Result<Value, WebhookError> {
    let event: Value = serde_json::from_slice(payload)?;
    let enrollment = decode_enrollment(&event)?;

    let (student, created) = data.store.find_or_create(&enrollment).await?;
    if created {
        info!("New student enrolled: {} (id {})", student, student.id);
    } else {
        info!("Student already enrolled: {} (id {})", student, student.id);
    }

    return Ok(event);
}
