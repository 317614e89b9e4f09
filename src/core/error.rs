// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for senscodec.
//!
//! Provides error types for capture file operations:
//! - Container and frame record parsing
//! - Color and depth payload decoding
//! - Payload encoding and container writing
//! - Frame export to the filesystem

use std::fmt;

/// Errors that can occur while reading, writing or exporting capture files.
#[derive(Debug, Clone)]
pub enum CodecError {
    /// Parse error in the container structure
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Container version differs from the supported one
    VersionMismatch {
        /// Supported version
        expected: u32,
        /// Version found in the file
        found: u32,
    },

    /// Stream ended before a declared length was satisfied
    BufferTooShort {
        /// Requested bytes
        requested: u64,
        /// Available bytes
        available: u64,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Compression tag outside the known set
    UnknownTag {
        /// Header field holding the tag
        field: String,
        /// Raw tag value
        tag: i32,
    },

    /// Payload uses a codec this crate cannot decode or encode
    UnsupportedCodec {
        /// Stream the payload belongs to ("color" or "depth")
        stream: String,
        /// Codec name
        codec: String,
    },

    /// Payload decoding failed
    DecodeError {
        /// Codec context (e.g., "zlib", "jpeg")
        codec: String,
        /// Error message
        message: String,
    },

    /// Payload or image encoding failed
    EncodeError {
        /// Codec context (e.g., "zlib", "png")
        codec: String,
        /// Error message
        message: String,
    },

    /// Invalid export or writer option
    InvalidOption {
        /// Option name
        option: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Filesystem error
    Io {
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a version mismatch error.
    pub fn version_mismatch(expected: u32, found: u32) -> Self {
        CodecError::VersionMismatch { expected, found }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: u64, available: u64, cursor_pos: u64) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create an unknown tag error.
    pub fn unknown_tag(field: impl Into<String>, tag: i32) -> Self {
        CodecError::UnknownTag {
            field: field.into(),
            tag,
        }
    }

    /// Create an "unsupported codec" error.
    pub fn unsupported_codec(stream: impl Into<String>, codec: impl Into<String>) -> Self {
        CodecError::UnsupportedCodec {
            stream: stream.into(),
            codec: codec.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::DecodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create an invalid option error.
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the file itself is malformed.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            CodecError::ParseError { .. }
                | CodecError::VersionMismatch { .. }
                | CodecError::BufferTooShort { .. }
                | CodecError::UnknownTag { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::VersionMismatch { expected, found } => vec![
                ("expected", expected.to_string()),
                ("found", found.to_string()),
            ],
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::UnknownTag { field, tag } => {
                vec![("field", field.clone()), ("tag", tag.to_string())]
            }
            CodecError::UnsupportedCodec { stream, codec } => {
                vec![("stream", stream.clone()), ("codec", codec.clone())]
            }
            CodecError::DecodeError { codec, message }
            | CodecError::EncodeError { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            CodecError::InvalidOption { option, reason } => {
                vec![("option", option.clone()), ("reason", reason.clone())]
            }
            CodecError::Io { message } => vec![("message", message.clone())],
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            CodecError::VersionMismatch { expected, found } => {
                write!(f, "Version mismatch: expected {expected}, found {found}")
            }
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::UnknownTag { field, tag } => {
                write!(f, "Unknown {field} tag: {tag}")
            }
            CodecError::UnsupportedCodec { stream, codec } => {
                write!(f, "Unsupported {stream} codec: '{codec}'")
            }
            CodecError::DecodeError { codec, message } => {
                write!(f, "{codec} decode error: {message}")
            }
            CodecError::EncodeError { codec, message } => {
                write!(f, "{codec} encode error: {message}")
            }
            CodecError::InvalidOption { option, reason } => {
                write!(f, "Invalid option '{option}': {reason}")
            }
            CodecError::Io { message } => write!(f, "IO error: {message}"),
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io {
            message: err.to_string(),
        }
    }
}

impl From<image::ImageError> for CodecError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => e.into(),
            image::ImageError::Decoding(e) => CodecError::decode("image", e.to_string()),
            other => CodecError::encode("image", other.to_string()),
        }
    }
}

/// Result type for senscodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = CodecError::parse("SensHeader", "bad sensor name");
        assert!(matches!(err, CodecError::ParseError { .. }));
        assert_eq!(err.to_string(), "Parse error in SensHeader: bad sensor name");
    }

    #[test]
    fn test_version_mismatch_error() {
        let err = CodecError::version_mismatch(4, 3);
        assert!(matches!(err, CodecError::VersionMismatch { .. }));
        assert_eq!(err.to_string(), "Version mismatch: expected 4, found 3");
    }

    #[test]
    fn test_buffer_too_short_error() {
        let err = CodecError::buffer_too_short(100, 50, 10);
        assert!(matches!(err, CodecError::BufferTooShort { .. }));
        assert_eq!(
            err.to_string(),
            "Buffer too short: requested 100 bytes at position 10, but only 50 bytes available"
        );
    }

    #[test]
    fn test_unknown_tag_error() {
        let err = CodecError::unknown_tag("color compression", 7);
        assert_eq!(err.to_string(), "Unknown color compression tag: 7");
    }

    #[test]
    fn test_unsupported_codec_error() {
        let err = CodecError::unsupported_codec("depth", "occi_ushort");
        assert!(matches!(err, CodecError::UnsupportedCodec { .. }));
        assert_eq!(err.to_string(), "Unsupported depth codec: 'occi_ushort'");
    }

    #[test]
    fn test_decode_and_encode_errors() {
        let err = CodecError::decode("zlib", "corrupt deflate stream");
        assert_eq!(err.to_string(), "zlib decode error: corrupt deflate stream");

        let err = CodecError::encode("png", "zero-sized image");
        assert_eq!(err.to_string(), "png encode error: zero-sized image");
    }

    #[test]
    fn test_invalid_option_error() {
        let err = CodecError::invalid_option("frame_skip", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid option 'frame_skip': must be at least 1"
        );
    }

    #[test]
    fn test_format_error_classification() {
        assert!(CodecError::version_mismatch(4, 5).is_format_error());
        assert!(CodecError::buffer_too_short(1, 0, 0).is_format_error());
        assert!(CodecError::unknown_tag("depth compression", 9).is_format_error());
        assert!(!CodecError::unsupported_codec("color", "png").is_format_error());
        assert!(!CodecError::Other("x".to_string()).is_format_error());
    }

    #[test]
    fn test_log_fields_buffer_too_short() {
        let err = CodecError::buffer_too_short(100, 50, 10);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("requested", "100".to_string()));
        assert_eq!(fields[1], ("available", "50".to_string()));
        assert_eq!(fields[2], ("cursor", "10".to_string()));
    }

    #[test]
    fn test_log_fields_version_mismatch() {
        let fields = CodecError::version_mismatch(4, 2).log_fields();
        assert_eq!(fields[0], ("expected", "4".to_string()));
        assert_eq!(fields[1], ("found", "2".to_string()));
    }

    #[test]
    fn test_log_fields_unsupported_codec() {
        let fields = CodecError::unsupported_codec("color", "raw").log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("stream", "color".to_string()));
        assert_eq!(fields[1], ("codec", "raw".to_string()));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let codec_err: CodecError = io_err.into();
        assert!(matches!(codec_err, CodecError::Io { .. }));
        assert_eq!(codec_err.to_string(), "IO error: file not found");
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::parse("Context", "message");
        let err2 = err1.clone();
        assert_eq!(err1.to_string(), err2.to_string());
    }
}
