//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod yaml;

use anyhow::Result;
use swagmark_core::Document;

/// Trait for rendering a Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> Result<String>;
    fn file_name(&self) -> &str;
}

/// Output formats the CLI can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

/// Create a renderer for the given format.
pub fn create_renderer(format: Format) -> Box<dyn Renderer> {
    match format {
        Format::Json => Box::new(json::JsonRenderer),
        Format::Yaml => Box::new(yaml::YamlRenderer),
    }
}
