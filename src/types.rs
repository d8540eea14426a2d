use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Capture operation, which is also the last path segment of a signed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Image,
    Pdf,
    Content,
    Metadata,
    Animated,
}

impl RequestKind {
    pub const ALL: [RequestKind; 5] = [
        RequestKind::Image,
        RequestKind::Pdf,
        RequestKind::Content,
        RequestKind::Metadata,
        RequestKind::Animated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Image => "image",
            RequestKind::Pdf => "pdf",
            RequestKind::Content => "content",
            RequestKind::Metadata => "metadata",
            RequestKind::Animated => "animated",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extracted page content returned for [`RequestKind::Content`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub html: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text_content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub markdown: String,
}

/// Page metadata returned for [`RequestKind::Metadata`].
///
/// The metadata map is passed through untouched; its keys depend on what the
/// service found on the page (title, description, Open Graph tags, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments() {
        let segments: Vec<&str> = RequestKind::ALL.iter().map(RequestKind::as_str).collect();
        assert_eq!(segments, ["image", "pdf", "content", "metadata", "animated"]);
    }

    #[test]
    fn test_display_matches_path_segment() {
        for kind in RequestKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_content_response_field_names() {
        let body = r##"{"success":true,"html":"<h1>Hi</h1>","textContent":"Hi","markdown":"# Hi"}"##;
        let content: ContentResponse = serde_json::from_str(body).unwrap();
        assert!(content.success);
        assert_eq!(content.text_content, "Hi");
        assert_eq!(content.markdown, "# Hi");

        let encoded = serde_json::to_value(&content).unwrap();
        assert_eq!(encoded["textContent"], "Hi");
    }

    #[test]
    fn test_content_response_missing_fields_default() {
        let content: ContentResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!content.success);
        assert!(content.markdown.is_empty());
    }

    #[test]
    fn test_content_response_null_fields_default() {
        let body = r#"{"success":false,"html":null,"textContent":null,"markdown":null}"#;
        let content: ContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(content, ContentResponse::default());

        let content: ContentResponse =
            serde_json::from_str(r##"{"success":null,"markdown":"# Hi"}"##).unwrap();
        assert!(!content.success);
        assert_eq!(content.markdown, "# Hi");
    }

    #[test]
    fn test_metadata_response_null_map_defaults() {
        let metadata: MetadataResponse =
            serde_json::from_str(r#"{"success":false,"metadata":null}"#).unwrap();
        assert!(!metadata.success);
        assert!(metadata.metadata.is_empty());
    }

    #[test]
    fn test_metadata_response_keeps_arbitrary_values() {
        let body = r#"{"success":true,"metadata":{"title":"Example","icons":["a.png"],"width":1200}}"#;
        let metadata: MetadataResponse = serde_json::from_str(body).unwrap();
        assert_eq!(metadata.metadata["title"], "Example");
        assert_eq!(metadata.metadata["icons"][0], "a.png");
        assert_eq!(metadata.metadata["width"], 1200);
    }
}
