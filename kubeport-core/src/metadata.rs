//! Metadata structs and the pure label/annotation derivation helpers.
use std::collections::BTreeMap;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::{gvk::GroupVersionKind, ir::IrService};

/// Canonical label key mapping every generated object back to its workload.
///
/// Selectors on decomposed siblings rely on this key, so it must stay
/// identical across a native object and any fallback objects built for it.
pub const APP_LABEL: &str = "app";

/// Type information that is flattened into every kubernetes object
#[derive(Deserialize, Serialize, Clone, Default, Debug, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// The version of the API
    pub api_version: String,

    /// The name of the API
    pub kind: String,
}

impl From<&GroupVersionKind> for TypeMeta {
    fn from(gvk: &GroupVersionKind) -> Self {
        Self {
            api_version: gvk.api_version(),
            kind: gvk.kind.clone(),
        }
    }
}

/// Labels attached to every object generated for the workload `name`.
pub fn service_labels(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(APP_LABEL.to_string(), name.to_string())])
}

/// Annotations derived from the workload's hints.
///
/// A workload without hints yields `None` rather than an empty map, so the
/// serialized metadata carries no `annotations` field at all.
pub fn service_annotations(service: &IrService) -> Option<BTreeMap<String, String>> {
    if service.annotations.is_empty() {
        None
    } else {
        Some(service.annotations.clone())
    }
}

/// Object metadata for anything generated from `service`.
pub fn object_meta(service: &IrService) -> ObjectMeta {
    ObjectMeta {
        name: Some(service.name.clone()),
        labels: Some(service_labels(&service.name)),
        annotations: service_annotations(service),
        ..Default::default()
    }
}
