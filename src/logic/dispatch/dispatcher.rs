//! Dispatcher
//!
//! Sends a triage request to the notification target exactly once.
//! No retry, no backoff, nothing persisted on failure.

use super::types::DispatchResult;
use super::InvocationTarget;
use crate::logic::triage::AlertTriageRequest;

/// Status assumed when the target could not be reached at all
const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Serialize `request` and invoke `function` on `target`
pub fn dispatch<T: InvocationTarget + ?Sized>(
    request: &AlertTriageRequest,
    function: &str,
    target: &T,
) -> DispatchResult {
    let payload = match request.to_payload() {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("Cannot serialize triage request {}: {}", request.identifier, e);
            return DispatchResult::Failure;
        }
    };

    let status = match target.invoke(function, &payload) {
        Ok(status) => status,
        Err(e) => {
            log::warn!("Dispatch of {} to {} failed: {}", request.identifier, function, e);
            TRANSPORT_FAILURE_STATUS
        }
    };

    DispatchResult::from_status(status)
}
