//! Document-level input type.

use serde::{Deserialize, Serialize};

use super::TextBlock;

/// The blocks of one document in reading order, plus identifying metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Document identifier, used when reporting failures
    #[serde(default)]
    pub id: String,

    /// Title from document metadata (or the file stem), used when the
    /// document has no blocks to take a title from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Text blocks in reading order
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

/// Accepted JSON layouts for a blocks file.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlocksFile {
    Bare(Vec<TextBlock>),
    Document(DocumentInput),
}

impl DocumentInput {
    /// Create a document from blocks.
    pub fn new(id: impl Into<String>, blocks: Vec<TextBlock>) -> Self {
        Self {
            id: id.into(),
            title: None,
            blocks,
        }
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse a blocks file: either a bare array of blocks or an object with
    /// `id`, `title` and `blocks`.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(match serde_json::from_str::<BlocksFile>(json)? {
            BlocksFile::Bare(blocks) => Self::new(String::new(), blocks),
            BlocksFile::Document(doc) => doc,
        })
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = DocumentInput::new("empty", Vec::new());
        assert!(doc.is_empty());
        assert!(doc.title.is_none());
    }

    #[test]
    fn test_from_json_bare_array() {
        let json = r#"[{"text": "Hello", "page_number": 1, "font_size": 12.0}]"#;
        let doc = DocumentInput::from_json(json).unwrap();
        assert_eq!(doc.blocks.len(), 1);
        assert!(doc.id.is_empty());
    }

    #[test]
    fn test_from_json_object() {
        let json = r#"{"id": "file01", "title": "Form",
                       "blocks": [{"text": "Hello", "page_number": 1, "font_size": 12.0}]}"#;
        let doc = DocumentInput::from_json(json).unwrap();
        assert_eq!(doc.id, "file01");
        assert_eq!(doc.title.as_deref(), Some("Form"));
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(DocumentInput::from_json("{not json").is_err());
    }
}
