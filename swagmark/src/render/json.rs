//! JSON renderer.
//!
//! Pretty-printed with two-space indentation and a trailing newline. Keys of
//! every map come out sorted, so repeated runs over the same sources produce
//! identical files.

use crate::render::Renderer;
use anyhow::{Context, Result};
use swagmark_core::Document;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(doc).context("failed to serialize document as JSON")?;
        out.push('\n');
        Ok(out)
    }

    fn file_name(&self) -> &str {
        "swagger.json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use swagmark_core::model::Info;

    fn minimal() -> Document {
        Document {
            swagger: Document::SWAGGER_VERSION.to_string(),
            info: Some(Info {
                title: "T".into(),
                version: "1".into(),
                ..Default::default()
            }),
            paths: Some(BTreeMap::new()),
            ..Default::default()
        }
    }

    #[test]
    fn renders_pretty_json_with_newline() {
        let out = JsonRenderer.render(&minimal()).unwrap();
        assert!(out.starts_with("{\n  \"swagger\": \"2.0\""));
        assert!(out.ends_with("}\n"));
        assert!(out.contains("\"paths\": {}"));
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let out = JsonRenderer.render(&minimal()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["info", "paths", "swagger"]);
    }

    #[test]
    fn rendering_is_stable() {
        let doc = minimal();
        assert_eq!(
            JsonRenderer.render(&doc).unwrap(),
            JsonRenderer.render(&doc).unwrap()
        );
    }
}
