#[cfg(test)]
mod tests {
    use crate::errors::sentinel::{FILE_CODEC_NOT_SUPPORTED, FILE_IS_NOT_VALID};
    use crate::{
        build_chain, propagate, ApiError, EnvelopeConfig, ErrorEnvelope, TimeZoneMode,
        VmetaConfig, WrapErr,
    };
    use std::fs;
    use tempfile::tempdir;
    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");
        let config = VmetaConfig {
            log_level: "debug".to_string(),
            envelope: EnvelopeConfig {
                time_zone: TimeZoneMode::Local,
                log_chains: false,
            },
        };
        config.save(&path).unwrap();
        let loaded = VmetaConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"local\""));
    }
    #[test]
    fn test_missing_config_gives_defaults() {
        let temp_dir = tempdir().unwrap();
        let loaded = VmetaConfig::load(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, VmetaConfig::default());
    }
    #[test]
    fn test_config_without_envelope_section() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"log_level": "info"}"#).unwrap();
        let loaded = VmetaConfig::load(&path).unwrap();
        assert_eq!(loaded.log_level, "info");
        assert_eq!(loaded.envelope, EnvelopeConfig::default());
    }
    #[test]
    fn test_broken_config_is_reported() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = VmetaConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }
    #[test]
    fn test_build_chain_order() {
        let chain = build_chain(&["outer", "inner"], Some("eof")).unwrap();
        assert_eq!(chain.public_message(), "outer");
        assert_eq!(chain.depth(), 2);
        assert_eq!(chain.root_cause().to_string(), "eof");
        assert!(build_chain::<&str>(&[], None).is_none());
    }
    #[test]
    fn test_propagate_labels_every_frame() {
        let err = propagate(&["handler", "parser", "reader"], "short read").unwrap_err();
        assert_eq!(err.public_message(), "handler");
        assert_eq!(err.depth(), 3);
        assert_eq!(err.root_cause().to_string(), "short read");
        let envelope: ErrorEnvelope =
            serde_json::from_slice(&err.report(&EnvelopeConfig::default())).unwrap();
        assert_eq!(envelope.error, "handler");
    }
    #[test]
    fn test_handler_flow_with_sentinel() {
        fn check_codec(codec: &str) -> Result<(), ApiError> {
            if codec == "avc1" {
                Ok(())
            } else {
                Err(FILE_CODEC_NOT_SUPPORTED.clone())
            }
        }
        fn inspect(codec: &str) -> Result<(), ApiError> {
            check_codec(codec).wrap_err_with(|| format!("inspect track ({codec})"))
        }
        assert!(inspect("avc1").is_ok());
        let err = inspect("mp4v").unwrap_err();
        assert!(err.is(&FILE_CODEC_NOT_SUPPORTED));
        assert!(!err.is(&FILE_IS_NOT_VALID));
        let body = String::from_utf8(err.to_json()).unwrap();
        assert!(body.contains("inspect track (mp4v)"));
        assert!(!body.contains(FILE_CODEC_NOT_SUPPORTED.public_message()));
    }
}
