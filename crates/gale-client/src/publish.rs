//! Challenge publish endpoint.

use gale_core::Case;
use serde::Serialize;
use serde_json::Value;

use crate::http::{is_failure, read_response};
use crate::{ServiceClient, ServiceError};

/// Body of `POST /api/admin/publish`.
#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest<'a> {
    pub date: &'a str,
    pub cases: &'a [Case],
    /// Clear existing submissions for `date` before storing the new cases.
    pub reset_submissions: bool,
}

impl ServiceClient {
    /// Publish `request` and return the service acknowledgment.
    ///
    /// The acknowledgment is the parsed JSON body, or `{"raw": <text>}` when
    /// the body is not a JSON object. Any 2xx status succeeds regardless of
    /// body shape.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::MissingToken`] if no admin token is set.
    /// - [`ServiceError::Http`] on transport failure or timeout.
    /// - [`ServiceError::Publish`] with the original status and body for any
    ///   status of 300 or above.
    pub async fn publish(&self, request: &PublishRequest<'_>) -> Result<Value, ServiceError> {
        let token = self
            .admin_token
            .as_deref()
            .ok_or(ServiceError::MissingToken)?;

        tracing::debug!(
            date = request.date,
            cases = request.cases.len(),
            reset_submissions = request.reset_submissions,
            "publishing challenge"
        );

        let resp = self
            .http
            .post(self.endpoint("/api/admin/publish"))
            .bearer_auth(token)
            .timeout(self.publish_timeout)
            .json(request)
            .send()
            .await?;
        let (status, body) = read_response(resp).await?;
        interpret_publish(status, body)
    }
}

fn interpret_publish(status: u16, body: Value) -> Result<Value, ServiceError> {
    if is_failure(status) {
        return Err(ServiceError::Publish { status, body });
    }
    Ok(body)
}
