// In: src/config.rs

//! Configuration for a nimble encoding session.
//!
//! `EncoderConfig` is created once at the application boundary (in code, or from
//! a JSON document) and handed to `Encoder::with_config`. None of its settings
//! change the bytes a session produces under the `Contiguous` layout; they tune
//! allocation and diagnostics only.

use serde::{Deserialize, Serialize};

use crate::error::NimbleError;

//==================================================================================
// I. Layout Selection
//==================================================================================

/// Selects the frame assembler used at `finalize`.
///
/// The write-side API never depends on this choice, so new layouts (for example
/// one that interleaves related streams for locality) can be added here without
/// touching callers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FrameLayout {
    /// **Default:** a 24-byte header of six stream lengths followed by all six
    /// streams laid out back to back.
    #[default]
    Contiguous,
}

//==================================================================================
// II. The Unified EncoderConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct EncoderConfig {
    /// Page size, in bytes, of the field-bytes appender.
    #[serde(default = "default_field_page_size")]
    pub field_page_size: usize,

    /// Initial capacity reserved for each chunk and binary stream.
    #[serde(default)]
    pub stream_capacity_hint: usize,

    /// The container layout produced by `finalize`.
    #[serde(default)]
    pub layout: FrameLayout,

    /// If true, every `finalize` emits a `log_metric!` record with the six
    /// stream lengths.
    #[serde(default)]
    pub log_stream_sizes: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            field_page_size: default_field_page_size(),
            stream_capacity_hint: 0,
            layout: FrameLayout::default(),
            log_stream_sizes: false,
        }
    }
}

impl EncoderConfig {
    /// Parses and validates a config from a JSON document. Missing fields take
    /// their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, NimbleError> {
        let config: EncoderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NimbleError> {
        if self.field_page_size == 0 {
            return Err(NimbleError::InvalidConfig(
                "field_page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Helper for `serde` to provide a default for `field_page_size`.
fn default_field_page_size() -> usize {
    4096
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = EncoderConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EncoderConfig::default());
        assert_eq!(config.field_page_size, 4096);
        assert_eq!(config.layout, FrameLayout::Contiguous);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = EncoderConfig::from_json_str(
            r#"{ "field_page_size": 64, "layout": "contiguous", "log_stream_sizes": true }"#,
        )
        .unwrap();
        assert_eq!(config.field_page_size, 64);
        assert!(config.log_stream_sizes);
        assert_eq!(config.stream_capacity_hint, 0);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let result = EncoderConfig::from_json_str(r#"{ "field_page_size": 0 }"#);
        assert!(matches!(result, Err(NimbleError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_layout_is_a_serde_error() {
        let result = EncoderConfig::from_json_str(r#"{ "layout": "interleaved" }"#);
        assert!(matches!(result, Err(NimbleError::SerdeJson(_))));
    }
}
