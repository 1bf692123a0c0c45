//! Predefined errors that handlers return and compare against.
use super::types::ApiError;
/// The file is not in a recognised or supported container format.
pub static FILE_IS_NOT_VALID: ApiError =
    ApiError::from_static("формат файла неизвестен или не поддерживается");
/// The file uses a video compression format the service cannot read.
pub static FILE_CODEC_NOT_SUPPORTED: ApiError =
    ApiError::from_static("неподдерживаемый формат сжатия видеофайла");
pub fn all() -> [&'static ApiError; 2] {
    [&FILE_IS_NOT_VALID, &FILE_CODEC_NOT_SUPPORTED]
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_sentinels_have_no_cause() {
        for sentinel in all() {
            assert!(sentinel.unwrap_cause().is_none());
            assert_eq!(sentinel.public_message(), sentinel.message());
            assert!(!sentinel.public_message().is_empty());
        }
    }
    #[test]
    fn test_wrapped_sentinel_is_still_detected() {
        let err = ApiError::wrap("read ftyp box", FILE_IS_NOT_VALID.clone());
        assert!(err.is(&FILE_IS_NOT_VALID));
        assert!(!err.is(&FILE_CODEC_NOT_SUPPORTED));
        assert_eq!(err.public_message(), "read ftyp box");
    }
}
