//! Upload validation before any request is made.

use crate::config::LimitsConfig;
use crate::error::CaptionError;
use crate::types::UploadCandidate;

/// Validates upload candidates against the configured limits.
///
/// Rules are checked in order and the first failing rule wins. Pure and
/// synchronous: no side effects, no I/O.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Accept or reject a candidate.
    ///
    /// Checks:
    /// 1. MIME type must match `image/*`
    /// 2. Size must not exceed the configured limit
    pub fn validate(&self, candidate: &UploadCandidate) -> Result<(), CaptionError> {
        if !candidate.mime_type.starts_with("image/") {
            return Err(CaptionError::Rejected {
                reason: "not an image".to_string(),
            });
        }

        if candidate.size_bytes() > self.limits.max_upload_bytes {
            return Err(CaptionError::Rejected {
                reason: "exceeds size limit".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(LimitsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(mime: &str, size: usize) -> UploadCandidate {
        UploadCandidate::new(mime, vec![0u8; size])
    }

    #[test]
    fn test_accepts_image_within_limit() {
        let validator = Validator::default();
        assert!(validator.validate(&candidate("image/jpeg", 1024)).is_ok());
        assert!(validator.validate(&candidate("image/png", 0)).is_ok());
        assert!(validator.validate(&candidate("image/webp", 512)).is_ok());
    }

    #[test]
    fn test_rejects_non_image_mime() {
        let validator = Validator::default();
        let err = validator
            .validate(&candidate("text/plain", 10))
            .unwrap_err();
        match err {
            CaptionError::Rejected { reason } => assert_eq!(reason, "not an image"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let validator = Validator::new(LimitsConfig {
            max_upload_bytes: 100,
        });
        let err = validator
            .validate(&candidate("image/jpeg", 101))
            .unwrap_err();
        match err {
            CaptionError::Rejected { reason } => assert_eq!(reason, "exceeds size limit"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_exactly_at_limit() {
        let validator = Validator::new(LimitsConfig {
            max_upload_bytes: 100,
        });
        assert!(validator.validate(&candidate("image/gif", 100)).is_ok());
    }

    #[test]
    fn test_mime_rule_checked_before_size() {
        // An oversized non-image fails on the MIME rule, not the size rule
        let validator = Validator::new(LimitsConfig { max_upload_bytes: 1 });
        let err = validator
            .validate(&candidate("application/pdf", 500))
            .unwrap_err();
        match err {
            CaptionError::Rejected { reason } => assert_eq!(reason, "not an image"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_image_prefix_requires_slash() {
        let validator = Validator::default();
        assert!(validator.validate(&candidate("imagejpeg", 10)).is_err());
    }
}
