use serde::Serialize;

use super::import::Importer;
use crate::wxr::{self, ParseError};

/// What an import would write, read without touching any store
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub title: String,
    pub canonical_name: String,
    pub exported_post_type: Option<String>,
    pub meta_count: usize,
    pub meta_keys: Vec<String>,
    pub warnings: Vec<String>,
}

impl Importer {
    /// Parse an export and summarize it
    pub fn preview(&self, document: &[u8]) -> Result<ImportPreview, ParseError> {
        let doc = wxr::parse(document)?;
        let mut warnings = Vec::new();

        if doc.title.is_empty() {
            warnings.push("Exported item has no title".to_string());
        }
        if doc.canonical_name.is_empty() {
            warnings.push("Exported item has no post name".to_string());
        }
        match doc.exported_post_type.as_deref() {
            Some(t) if t == self.options().post_type => {}
            Some(t) => warnings.push(format!(
                "Exported post type is '{}', will be imported as '{}'",
                t,
                self.options().post_type
            )),
            None => {}
        }
        if doc.meta_rows.is_empty() {
            warnings.push("No meta rows found".to_string());
        }

        Ok(ImportPreview {
            meta_count: doc.meta_rows.len(),
            meta_keys: doc.meta_rows.iter().map(|r| r.key.clone()).collect(),
            title: doc.title,
            canonical_name: doc.canonical_name,
            exported_post_type: doc.exported_post_type,
            warnings,
        })
    }
}
