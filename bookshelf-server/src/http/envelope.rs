//! Response envelopes
//!
//! Success: `{"status": "success", "data": ...}`
//! Client error: `{"status": "fail", "data": {"msg": ...}}`
//! Server error: `{"status": "error", "message": ...}`

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
    Error,
}

/// `{status, data}` wrapper returned by every endpoint
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    pub data: T,
}

/// Payload of a `fail` envelope
#[derive(Debug, Serialize)]
pub struct FailData {
    pub msg: String,
}

/// Body of a 5xx response; carries no data
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: Status,
    pub message: &'static str,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data,
        }
    }
}

impl Envelope<FailData> {
    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            data: FailData { msg: msg.into() },
        }
    }
}

impl ErrorBody {
    pub fn internal() -> Self {
        Self {
            status: Status::Error,
            message: "an internal error occurred",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fail_shape() {
        let value = serde_json::to_value(Envelope::fail("Book not found")).unwrap();
        assert_eq!(
            value,
            json!({"status": "fail", "data": {"msg": "Book not found"}})
        );
    }

    #[test]
    fn success_wraps_payload() {
        let value = serde_json::to_value(Envelope::success(vec![1, 2])).unwrap();
        assert_eq!(value, json!({"status": "success", "data": [1, 2]}));
    }
}
