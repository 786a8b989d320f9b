//! Maps HTTP status and envelope codes onto registry errors.

use access_webhooks_protocols::RegistryError;

use crate::api::Envelope;

/// The registry call a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    List,
    Create,
    Update(&'a str),
    Delete(&'a str),
}

impl Operation<'_> {
    /// Id of the record the call targets, if any.
    fn target(&self) -> Option<&str> {
        match self {
            Self::Update(id) | Self::Delete(id) => Some(*id),
            Self::List | Self::Create => None,
        }
    }

    /// Error for a server-reported failure of this call.
    fn rejection(&self, message: String) -> RegistryError {
        match self {
            Self::Create | Self::Update(_) => RegistryError::ValidationRejected(message),
            Self::List | Self::Delete(_) => RegistryError::Rejected(message),
        }
    }
}

/// Interpret a completed HTTP exchange.
///
/// Returns the envelope only for a 2xx status with a `SUCCESS` code.
pub fn interpret(op: Operation<'_>, status: u16, body: &str) -> Result<Envelope, RegistryError> {
    let envelope = serde_json::from_str::<Envelope>(body).ok();
    let is_2xx = (200..300).contains(&status);

    if let Some(id) = op.target() {
        let not_found = status == 404 || envelope.as_ref().is_some_and(Envelope::is_not_found);
        if not_found {
            return Err(RegistryError::NotFound(id.to_string()));
        }
    }

    match envelope {
        Some(envelope) if is_2xx && envelope.is_success() => Ok(envelope),
        Some(envelope) if is_2xx => Err(op.rejection(envelope.describe())),
        Some(envelope) => Err(op.rejection(format!("HTTP {}: {}", status, envelope.describe()))),
        None if is_2xx => Err(RegistryError::Rejected(format!(
            "unexpected response body: {}",
            body.trim()
        ))),
        None => Err(op.rejection(format!("HTTP {}: {}", status, body.trim()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let envelope = interpret(Operation::List, 200, r#"{"code":"SUCCESS","data":[]}"#).unwrap();
        assert!(envelope.is_success());
    }

    #[test]
    fn test_list_failure_code_is_rejected() {
        let err = interpret(
            Operation::List,
            200,
            r#"{"code":"CODE_AUTH_FAILED","msg":"token expired"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Rejected("CODE_AUTH_FAILED: token expired".to_string())
        );
    }

    #[test]
    fn test_create_failure_code_is_validation_rejected() {
        let err = interpret(
            Operation::Create,
            200,
            r#"{"code":"CODE_PARAMS_INVALID","msg":"duplicate name"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::ValidationRejected("CODE_PARAMS_INVALID: duplicate name".to_string())
        );
    }

    #[test]
    fn test_update_http_404_is_not_found() {
        let err = interpret(Operation::Update("wh-1"), 404, "").unwrap_err();
        assert_eq!(err, RegistryError::NotFound("wh-1".to_string()));
    }

    #[test]
    fn test_delete_not_exists_code_is_not_found() {
        let err = interpret(
            Operation::Delete("wh-1"),
            200,
            r#"{"code":"CODE_NOT_EXISTS","msg":"webhook not exists"}"#,
        )
        .unwrap_err();
        assert_eq!(err, RegistryError::NotFound("wh-1".to_string()));
    }

    #[test]
    fn test_list_http_404_is_rejected_not_not_found() {
        let err = interpret(Operation::List, 404, "Not Found").unwrap_err();
        assert_eq!(err, RegistryError::Rejected("HTTP 404: Not Found".to_string()));
    }

    #[test]
    fn test_server_error_with_envelope() {
        let err = interpret(
            Operation::Update("wh-1"),
            500,
            r#"{"code":"CODE_SYSTEM_ERROR","msg":"boom"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::ValidationRejected("HTTP 500: CODE_SYSTEM_ERROR: boom".to_string())
        );
    }

    #[test]
    fn test_undecodable_success_body() {
        let err = interpret(Operation::Create, 200, "<html>proxy</html>").unwrap_err();
        assert!(matches!(err, RegistryError::Rejected(msg) if msg.contains("proxy")));
    }
}
