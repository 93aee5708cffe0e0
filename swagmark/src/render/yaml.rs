//! YAML renderer.

use crate::render::Renderer;
use anyhow::{Context, Result};
use swagmark_core::Document;

pub struct YamlRenderer;

impl Renderer for YamlRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        serde_yaml::to_string(doc).context("failed to serialize document as YAML")
    }

    fn file_name(&self) -> &str {
        "swagger.yaml"
    }
}
