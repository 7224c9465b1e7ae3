//! Image re-encoding for embedding in blog posts.

use base64::{engine::general_purpose, Engine as _};

/// Encode image bytes as a `data:` URL.
///
/// Returns None unless `content_type` is an `image/*` type.
pub fn image_to_data_url(content_type: &str, bytes: &[u8]) -> Option<String> {
    let content_type = content_type.trim().to_ascii_lowercase();
    let subtype = content_type.strip_prefix("image/")?;
    if subtype.is_empty()
        || !subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }

    Some(format!(
        "data:{};base64,{}",
        content_type,
        general_purpose::STANDARD.encode(bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_data_url() {
        let url = image_to_data_url("image/png", &[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_content_type_normalised() {
        let url = image_to_data_url(" Image/SVG+XML ", b"<svg/>").unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_non_image_rejected() {
        assert!(image_to_data_url("text/html", b"<script>").is_none());
        assert!(image_to_data_url("application/octet-stream", b"").is_none());
        assert!(image_to_data_url("image/", b"").is_none());
        assert!(image_to_data_url("image/png;base64,AAAA", b"").is_none());
    }
}
