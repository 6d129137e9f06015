//! Line-oriented wire format used by the `procura-api` binary.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use procura_core::{ProcureError, ProcureResult};

use crate::dispatch::Response;
use crate::operation::CallClass;

/// One call: `{"class":"invoke","function":"CreateItems","args":[]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub class: CallClass,
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Reply written for each invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Reply {
    pub fn from_result(result: ProcureResult<Response>) -> Self {
        match result {
            Ok(response) => Self::success(response),
            Err(err) => Self::failure(error_code(&err), err.to_string()),
        }
    }

    pub fn success(response: Response) -> Self {
        // Payloads are JSON; anything else is passed through as a string.
        let payload = response.into_payload().map(|bytes| {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(&bytes).into_owned()))
        });
        Self {
            ok: true,
            payload,
            error: None,
            code: None,
        }
    }

    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload: None,
            error: Some(message.into()),
            code: Some(code.to_string()),
        }
    }
}

pub fn error_code(err: &ProcureError) -> &'static str {
    match err {
        ProcureError::MissingArgument { .. } => "missing_argument",
        ProcureError::NotFound(_) => "not_found",
        ProcureError::PersistenceFailure(_) => "persistence_failure",
        ProcureError::DecodeFailure(_) => "decode_failure",
        ProcureError::EncodeFailure(_) => "encode_failure",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_args_default_to_empty() {
        let inv: Invocation =
            serde_json::from_str(r#"{"class":"invoke","function":"CreateItems"}"#).unwrap();
        assert_eq!(inv.class, CallClass::Invoke);
        assert!(inv.args.is_empty());
    }

    #[test]
    fn empty_success_has_no_payload_field() {
        let reply = Reply::from_result(Ok(Response::empty()));
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({"ok": true})
        );
    }

    #[test]
    fn failure_carries_code() {
        let reply = Reply::from_result(Err(ProcureError::not_found("purchase order 'x'")));
        assert!(!reply.ok);
        assert_eq!(reply.code.as_deref(), Some("not_found"));
        assert_eq!(reply.error.as_deref(), Some("not found: purchase order 'x'"));
    }

    #[test]
    fn json_payload_is_embedded() {
        let reply = Reply::success(Response::encode(&vec![1, 2]).unwrap());
        assert_eq!(reply.payload, Some(serde_json::json!([1, 2])));
    }
}
