use crate::errors::TimeZoneMode;
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}
#[derive(Default)]
pub struct ConfigValidator;
impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }
    pub fn validate_config(&self, config: &crate::VmetaConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        self.validate_log_level(&config.log_level, &mut errors);
        self.validate_envelope_config(&config.envelope, &mut warnings);
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
    fn validate_log_level(&self, level: &str, errors: &mut Vec<ValidationError>) {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            errors
                .push(ValidationError {
                    field: "log_level".to_string(),
                    message: format!("Invalid log level: {}", level),
                    suggestion: Some(format!("Use one of: {:?}", LOG_LEVELS)),
                });
        }
    }
    fn validate_envelope_config(
        &self,
        config: &crate::EnvelopeConfig,
        warnings: &mut Vec<ValidationWarning>,
    ) {
        if config.time_zone == TimeZoneMode::Local {
            warnings
                .push(ValidationWarning {
                    field: "envelope.time_zone".to_string(),
                    message: "Local time is sent as a numeric offset, not a zone name"
                        .to_string(),
                    suggestion: Some(
                        "Use \"utc\" if clients parse the zone abbreviation".to_string(),
                    ),
                });
        }
        if !config.log_chains {
            warnings
                .push(ValidationWarning {
                    field: "envelope.log_chains".to_string(),
                    message: "Error chains will not be logged".to_string(),
                    suggestion: None,
                });
        }
    }
    pub fn validate_and_fix_config(&self, config: &mut crate::VmetaConfig) -> ValidationResult {
        let result = self.validate_config(config);
        if !LOG_LEVELS.contains(&config.log_level.to_ascii_lowercase().as_str()) {
            config.log_level = crate::DEFAULT_LOG_LEVEL.to_string();
        }
        result
    }
}
