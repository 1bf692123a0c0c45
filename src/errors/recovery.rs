use super::types::{ApiError, SharedError};
use log::{debug, warn};
use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
/// Panic payload that was not an error value.
#[derive(Debug, Clone, Error)]
#[error("unexpected internal fault: {detail}")]
pub struct UnexpectedFault {
    pub detail: String,
}
/// Converts a caught panic payload into an error.
///
/// `SharedError` is the payload raised by [`raise`]; a bare `ApiError` is
/// accepted as well. Anything else, including the strings produced by
/// `panic!`, becomes an [`UnexpectedFault`].
pub fn payload_into_error(payload: Box<dyn Any + Send>) -> SharedError {
    let payload = match payload.downcast::<SharedError>() {
        Ok(err) => return *err,
        Err(other) => other,
    };
    let payload = match payload.downcast::<ApiError>() {
        Ok(err) => return Arc::new(*err),
        Err(other) => other,
    };
    let detail = if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-error panic payload".to_string()
    };
    warn!("recovered panic without an error payload: {detail}");
    Arc::new(UnexpectedFault { detail })
}
/// Unwinds the current thread with `err` as the panic payload.
pub fn raise(err: SharedError) -> ! {
    panic::panic_any(err)
}
/// Panics with `err` unchanged when it is present.
pub fn fatal<E>(err: Option<E>)
where
    E: std::error::Error + Send + Sync + 'static,
{
    if let Some(err) = err {
        raise(Arc::new(err));
    }
}
/// Runs `body`; if it panics, the payload is labelled with `message` and
/// raised again, so the unwinding continues with more context.
pub fn restore_and_panic<T, F>(message: impl Into<Cow<'static, str>>, body: F) -> T
where
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(payload) => {
            let cause = payload_into_error(payload);
            let err = ApiError::wrap_shared(message, cause);
            debug!("relabelled panic: {}", err.message());
            raise(Arc::new(err))
        }
    }
}
/// Runs `body` with access to the error `slot`.
///
/// When `body` panics and the slot holds an error at that point, the slot is
/// overwritten with the panic payload labelled with `message` and `None` is
/// returned. When the slot is empty the panic keeps unwinding untouched.
pub fn restore<T, F>(
    slot: &mut Option<SharedError>,
    message: impl Into<Cow<'static, str>>,
    body: F,
) -> Option<T>
where
    F: FnOnce(&mut Option<SharedError>) -> T,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(&mut *slot)));
    match outcome {
        Ok(value) => Some(value),
        Err(payload) => {
            if slot.is_none() {
                panic::resume_unwind(payload);
            }
            let cause = payload_into_error(payload);
            let err = ApiError::wrap_shared(message, cause);
            debug!("recovered panic into error slot: {}", err.message());
            *slot = Some(Arc::new(err));
            None
        }
    }
}
/// Result-returning counterpart of [`restore`]: a panic inside `body`
/// becomes an `Err` labelled with `message`.
pub fn recover<T, F>(message: impl Into<Cow<'static, str>>, body: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(body)).map_err(|payload| {
        let err = ApiError::wrap_shared(message, payload_into_error(payload));
        debug!("recovered panic: {}", err.message());
        err
    })
}
