//! Dispatch Module - Delivery of triage requests
//!
//! # Components
//! - `types.rs`: ternary dispatch result and transport errors
//! - `dispatcher.rs`: one-shot dispatch of a triage request
//! - `lambda.rs`: AWS Lambda `Invoke` over blocking HTTP
//! - `sigv4.rs`: AWS Signature Version 4 request signing

pub mod dispatcher;
pub mod lambda;
pub mod sigv4;
pub mod types;

pub use dispatcher::dispatch;
pub use lambda::LambdaInvoker;
pub use types::{DispatchResult, InvokeError};

/// Downstream target that accepts a payload and reports an HTTP-like status
pub trait InvocationTarget {
    fn invoke(&self, function: &str, payload: &[u8]) -> Result<u16, InvokeError>;
}

impl<T: InvocationTarget + ?Sized> InvocationTarget for &T {
    fn invoke(&self, function: &str, payload: &[u8]) -> Result<u16, InvokeError> {
        (**self).invoke(function, payload)
    }
}
