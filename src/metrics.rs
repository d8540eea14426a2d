//! Request instrumentation through the `metrics` facade
//!
//! Nothing is exported from here. Values go to whichever recorder the
//! embedding application installed, and are dropped when there is none.

use crate::error::CaptureError;
use crate::types::RequestKind;
use std::time::Duration;

pub const REQUESTS_TOTAL: &str = "capture_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "capture_request_duration_seconds";

pub fn outcome_label<T>(result: &Result<T, CaptureError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(CaptureError::HttpStatus(_)) => "http_error",
        Err(CaptureError::Transport(_)) => "transport_error",
        Err(CaptureError::Decode(_)) => "decode_error",
        Err(_) => "error",
    }
}

pub fn record_dispatch(kind: RequestKind, duration: Duration, outcome: &'static str) {
    ::metrics::increment_counter!(REQUESTS_TOTAL, "kind" => kind.as_str(), "outcome" => outcome);
    ::metrics::histogram!(REQUEST_DURATION_SECONDS, duration.as_secs_f64(), "kind" => kind.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome_label(&Ok::<(), CaptureError>(())), "success");
        assert_eq!(outcome_label::<()>(&Err(CaptureError::HttpStatus(502))), "http_error");
        assert_eq!(
            outcome_label::<()>(&Err(CaptureError::Transport("reset".into()))),
            "transport_error"
        );
        assert_eq!(
            outcome_label::<()>(&Err(CaptureError::Decode("eof".into()))),
            "decode_error"
        );
        assert_eq!(outcome_label::<()>(&Err(CaptureError::MissingTargetUrl)), "error");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_dispatch(RequestKind::Image, Duration::from_millis(120), "success");
    }
}
