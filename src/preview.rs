//! Preview encoding: turn an upload into a renderable data URI.

use crate::types::{PreviewImage, UploadCandidate};
use base64::Engine;

/// Encode an upload candidate as a base64 data URI.
///
/// Single-shot and asynchronous: encoding up to 10 MiB runs on the blocking
/// pool. A failed encode yields no preview rather than an error; the failure
/// is logged and the caption request proceeds independently.
pub async fn encode(candidate: &UploadCandidate) -> Option<PreviewImage> {
    let mime_type = candidate.mime_type.clone();
    let bytes = candidate.bytes.clone();

    let encoded = tokio::task::spawn_blocking(move || {
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    })
    .await;

    match encoded {
        Ok(data) => Some(PreviewImage(format!("data:{mime_type};base64,{data}"))),
        Err(e) => {
            tracing::warn!("Preview encode task failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encode_produces_data_uri() {
        let candidate = UploadCandidate::new("image/png", vec![0x89, 0x50, 0x4E, 0x47]);
        let preview = encode(&candidate).await.unwrap();
        assert!(preview.as_str().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_encode_round_trips_bytes() {
        let bytes = vec![1u8, 2, 3, 4, 5];
        let candidate = UploadCandidate::new("image/jpeg", bytes.clone());
        let preview = encode(&candidate).await.unwrap();
        let payload = preview
            .as_str()
            .strip_prefix("data:image/jpeg;base64,")
            .unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(decoded, bytes);
    }

    #[tokio::test]
    async fn test_encode_empty_file() {
        let candidate = UploadCandidate::new("image/gif", vec![]);
        let preview = encode(&candidate).await.unwrap();
        assert_eq!(preview.as_str(), "data:image/gif;base64,");
    }
}
