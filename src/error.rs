//! Error types for the lens_colors library

use thiserror::Error;

/// Result type alias for lens_colors operations
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Error types for color extraction and matching operations
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Image could not be opened or rasterized
    #[error("Failed to decode image: {message}")]
    DecodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Every pixel fell below the alpha visibility threshold
    #[error("No visible pixels in {width}x{height} image")]
    NoVisiblePixels { width: u32, height: u32 },

    /// Palette quantization could not produce a result.
    ///
    /// Only raised inside the extractor, which falls back to histogram
    /// counting when it sees this variant.
    #[error("Palette strategy unavailable: {reason}")]
    PaletteUnavailable { reason: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Reference color dataset could not be read or parsed
    #[error("Failed to load reference colors: {message}")]
    ReferenceLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be read, written or applied
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ExtractionError {
    /// Create a decode error with context
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DecodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a reference dataset error with context
    pub fn reference_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ReferenceLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error indicates a condition the extractor recovers from
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExtractionError::PaletteUnavailable { .. })
    }

    /// Get user-friendly error description for inline display
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::DecodeError { .. } => {
                "Could not read the image. Please check the file format and try again.".to_string()
            }
            ExtractionError::NoVisiblePixels { .. } => {
                "The image is fully transparent, so no color could be detected.".to_string()
            }
            ExtractionError::ReferenceLoadError { .. } => {
                "The reference color catalog could not be loaded.".to_string()
            }
            ExtractionError::InvalidParameter { parameter, .. } => {
                format!("The setting '{}' is out of range.", parameter)
            }
            _ => "Color extraction failed. Please try with a different image.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_palette_failure_is_recoverable() {
        let palette = ExtractionError::PaletteUnavailable {
            reason: "empty".into(),
        };
        assert!(palette.is_recoverable());

        let no_pixels = ExtractionError::NoVisiblePixels {
            width: 4,
            height: 4,
        };
        assert!(!no_pixels.is_recoverable());

        let decode = ExtractionError::decode(
            "bad header",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "truncated"),
        );
        assert!(!decode.is_recoverable());
    }

    #[test]
    fn test_decode_error_keeps_source() {
        use std::error::Error as _;

        let err = ExtractionError::decode(
            "photo.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Failed to decode image: photo.png");
    }

    #[test]
    fn test_user_messages() {
        let err = ExtractionError::invalid_parameter("tolerance", -1.0);
        assert!(err.user_message().contains("tolerance"));
        assert_eq!(err.to_string(), "Invalid parameter: tolerance = -1");

        let err = ExtractionError::NoVisiblePixels {
            width: 2,
            height: 3,
        };
        assert!(err.user_message().contains("transparent"));
        assert_eq!(err.to_string(), "No visible pixels in 2x3 image");
    }
}
