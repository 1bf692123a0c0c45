use std::borrow::Cow;
use std::error::Error;
use std::sync::Arc;
/// Shared, thread-safe handle to any error value.
///
/// Causes inside an [`ApiError`] and payloads raised by the recovery helpers
/// all use this type, so a chain can hold either another `ApiError` or a plain
/// error from a lower layer.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;
const SEPARATOR: &str = "; ";
/// Error of the web service: a public message for API clients, the message
/// attached at this layer, and an optional wrapped cause.
#[derive(Debug, Clone)]
pub struct ApiError {
    public_message: Cow<'static, str>,
    message: Cow<'static, str>,
    cause: Option<SharedError>,
}
impl ApiError {
    /// Error without a cause. Usable in `static` items.
    pub const fn from_static(message: &'static str) -> Self {
        Self {
            public_message: Cow::Borrowed(message),
            message: Cow::Borrowed(message),
            cause: None,
        }
    }
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        Self {
            public_message: message.clone(),
            message,
            cause: None,
        }
    }
    pub fn wrap<E>(message: impl Into<Cow<'static, str>>, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::wrap_shared(message, Arc::new(cause))
    }
    pub fn wrap_shared(message: impl Into<Cow<'static, str>>, cause: SharedError) -> Self {
        Self::with_cause(message, Some(cause))
    }
    /// General constructor: `message` becomes both the public and the
    /// internal message, `cause` may be absent.
    pub fn with_cause(
        message: impl Into<Cow<'static, str>>,
        cause: Option<SharedError>,
    ) -> Self {
        let message = message.into();
        Self {
            public_message: message.clone(),
            message,
            cause,
        }
    }
    pub fn public_message(&self) -> &str {
        &self.public_message
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    /// Immediate cause, if any.
    pub fn unwrap_cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
    pub fn shared_cause(&self) -> Option<&SharedError> {
        self.cause.as_ref()
    }
    /// Flattened diagnostic text for logs.
    ///
    /// While the current cause is itself an `ApiError`, its complete rendered
    /// text is appended and the walk moves on to that node's cause. A plain
    /// error left at the end is appended once more. Nested text therefore
    /// repeats for chains deeper than two layers; log consumers rely on this
    /// exact output.
    pub fn render_text(&self) -> String {
        let mut text = self.message.to_string();
        let mut cause = self.unwrap_cause();
        while let Some(node) = cause.and_then(|err| err.downcast_ref::<ApiError>()) {
            text.push_str(SEPARATOR);
            text.push_str(&node.render_text());
            cause = node.unwrap_cause();
        }
        if let Some(plain) = cause {
            text.push_str(SEPARATOR);
            text.push_str(&plain.to_string());
        }
        text
    }
    /// Iterates over this error and every cause below it, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        std::iter::successors(Some(self as &(dyn Error + 'static)), |&err| err.source())
    }
    /// Number of consecutive `ApiError` layers, starting with this one.
    pub fn depth(&self) -> usize {
        self.chain().take_while(|err| err.is::<ApiError>()).count()
    }
    /// Innermost error of the chain; `self` when there is no cause.
    pub fn root_cause(&self) -> &(dyn Error + 'static) {
        self.chain().last().unwrap_or(self)
    }
    /// Whether any `ApiError` layer of the chain equals `target`.
    pub fn is(&self, target: &ApiError) -> bool {
        self.chain()
            .filter_map(|err| err.downcast_ref::<ApiError>())
            .any(|node| node == target)
    }
}
impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        self.public_message == other.public_message && self.message == other.message
            && match (&self.cause, &other.cause) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text())
    }
}
impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|err| err as &(dyn Error + 'static))
    }
}
/// Labels the error side of a `Result` with a new `ApiError` layer.
pub trait WrapErr<T> {
    fn wrap_err(self, message: impl Into<Cow<'static, str>>) -> Result<T, ApiError>;
    fn wrap_err_with<M, F>(self, message: F) -> Result<T, ApiError>
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M;
}
impl<T, E> WrapErr<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn wrap_err(self, message: impl Into<Cow<'static, str>>) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::wrap(message, err))
    }
    fn wrap_err_with<M, F>(self, message: F) -> Result<T, ApiError>
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M,
    {
        self.map_err(|err| ApiError::wrap(message(), err))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    fn plain(text: &str) -> io::Error {
        io::Error::new(io::ErrorKind::Other, text.to_string())
    }
    #[test]
    fn test_new_has_no_cause() {
        for message in ["a", "файл", "some longer message"] {
            let err = ApiError::new(message);
            assert!(err.unwrap_cause().is_none());
            assert!(err.source().is_none());
            assert_eq!(err.public_message(), message);
            assert_eq!(err.message(), message);
        }
    }
    #[test]
    fn test_render_two_layers() {
        let err = ApiError::wrap("b", ApiError::new("a"));
        assert_eq!(err.render_text(), "b; a");
        assert_eq!(err.to_string(), "b; a");
    }
    #[test]
    fn test_render_repeats_nested_text() {
        let err = ApiError::wrap("c", ApiError::wrap("b", ApiError::new("a")));
        assert_eq!(err.render_text(), "c; b; a; a");
        let err = ApiError::wrap("d", err);
        assert_eq!(err.render_text(), "d; c; b; a; a; b; a; a");
    }
    #[test]
    fn test_render_appends_plain_leaf_again() {
        let err = ApiError::wrap("b", plain("disk"));
        assert_eq!(err.render_text(), "b; disk");
        let err = ApiError::wrap("c", err);
        assert_eq!(err.render_text(), "c; b; disk; disk");
    }
    #[test]
    fn test_depth_and_unwrap_reach_root() {
        let mut err = ApiError::wrap("layer 1", plain("root"));
        for n in 2..=5 {
            err = ApiError::wrap(format!("layer {n}"), err);
        }
        assert_eq!(err.depth(), 5);
        let mut current: &(dyn Error + Send + Sync + 'static) = &err;
        for _ in 0..5 {
            let node = current.downcast_ref::<ApiError>().unwrap();
            current = node.unwrap_cause().unwrap();
        }
        assert_eq!(current.to_string(), "root");
        assert!(current.downcast_ref::<io::Error>().is_some());
        assert_eq!(err.root_cause().to_string(), "root");
    }
    #[test]
    fn test_root_cause_without_cause_is_self() {
        let err = ApiError::new("alone");
        assert_eq!(err.root_cause().to_string(), "alone");
        assert_eq!(err.depth(), 1);
    }
    #[test]
    fn test_is_finds_layer_through_context() {
        static TARGET: ApiError = ApiError::from_static("target");
        let err = ApiError::wrap("outer", ApiError::wrap("middle", TARGET.clone()));
        assert!(err.is(&TARGET));
        assert!(!err.is(&ApiError::new("other")));
        assert!(!ApiError::wrap("target", plain("x")).is(&TARGET));
    }
    #[test]
    fn test_wrap_err_labels_result() {
        let result: Result<(), io::Error> = Err(plain("eof"));
        let err = result.wrap_err("read header").unwrap_err();
        assert_eq!(err.public_message(), "read header");
        assert_eq!(err.render_text(), "read header; eof");
        let ok: Result<u8, io::Error> = Ok(7);
        assert_eq!(ok.wrap_err_with(|| format!("unused {}", 1)).unwrap(), 7);
    }
}
