//! Per-kind merge of decoded bodies into the document.
//!
//! - `api:meta`: first body wins, later ones are ignored.
//! - `api:route`: bodies are folded in order; a path seen again replaces the
//!   earlier path item wholesale.
//! - `api:model`: same last-wins policy on definition names.

use crate::error::DecodeError;
use crate::markup::MarkupKind;
use crate::model::*;
use crate::node::decode_as;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level fields an `api:meta` body may set.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Meta {
    info: Option<Info>,
    host: Option<String>,
    base_path: Option<String>,
    schemes: Vec<Scheme>,
    consumes: Vec<String>,
    produces: Vec<String>,
    parameters: BTreeMap<String, Parameter>,
    responses: BTreeMap<String, Response>,
    security_definitions: BTreeMap<String, SecurityScheme>,
    security: Vec<SecurityRequirement>,
    tags: Vec<Tag>,
    external_docs: Option<ExternalDocs>,
}

/// Merge the bodies of one kind into `doc`.
pub fn merge(kind: MarkupKind, doc: &mut Document, bodies: &[String]) -> Result<(), DecodeError> {
    match kind {
        MarkupKind::Meta => merge_meta(doc, bodies),
        MarkupKind::Route => merge_routes(doc, bodies),
        MarkupKind::Model => merge_models(doc, bodies),
    }
}

/// Apply the first `api:meta` body to the document's top-level fields.
pub fn merge_meta(doc: &mut Document, bodies: &[String]) -> Result<(), DecodeError> {
    doc.swagger = Document::SWAGGER_VERSION.to_string();
    let Some(first) = bodies.first() else {
        return Ok(());
    };
    if bodies.len() > 1 {
        log::warn!(
            "found {} api:meta blocks; only the first is used",
            bodies.len()
        );
    }

    let meta: Meta = decode_as(first)?;
    doc.info = meta.info;
    doc.host = meta.host;
    doc.base_path = meta.base_path;
    doc.schemes = meta.schemes;
    doc.consumes = meta.consumes;
    doc.produces = meta.produces;
    doc.parameters = meta.parameters;
    doc.responses = meta.responses;
    doc.security_definitions = meta.security_definitions;
    doc.security = meta.security;
    doc.tags = meta.tags;
    doc.external_docs = meta.external_docs;
    Ok(())
}

/// Fold `api:route` bodies into `doc.paths`, last path wins.
pub fn merge_routes(doc: &mut Document, bodies: &[String]) -> Result<(), DecodeError> {
    let paths = doc.paths.get_or_insert_with(BTreeMap::new);
    for body in bodies {
        let fragment: BTreeMap<String, PathItem> = decode_as(body)?;
        for (path, item) in fragment {
            let methods: Vec<_> = item.operations().into_iter().map(|(m, _)| m).collect();
            log::debug!("merging path {} [{}]", path, methods.join(", "));
            if paths.insert(path.clone(), item).is_some() {
                log::debug!("path {} redefined; earlier definition replaced", path);
            }
        }
    }
    Ok(())
}

/// Fold `api:model` bodies into a fresh definitions map, last name wins.
pub fn merge_models(doc: &mut Document, bodies: &[String]) -> Result<(), DecodeError> {
    let mut definitions = BTreeMap::new();
    for body in bodies {
        let fragment: BTreeMap<String, Schema> = decode_as(body)?;
        for (name, schema) in fragment {
            log::debug!("merging definition {}", name);
            if definitions.insert(name.clone(), schema).is_some() {
                log::debug!("definition {} redefined; earlier schema replaced", name);
            }
        }
    }
    doc.definitions = Some(definitions);
    Ok(())
}
