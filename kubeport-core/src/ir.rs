//! The source-agnostic intermediate representation handed to resource generators.
use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::PodSpec;
use serde::{Deserialize, Serialize};

/// One deployable workload from the source application.
///
/// Generators read it and construct fresh manifest objects; nothing here is
/// mutated by the transform layer.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct IrService {
    /// Workload name, unique within the [`Ir`]; becomes the resource name of
    /// everything generated for this workload.
    pub name: String,
    /// Pod template for the workload, opaque to generators except for the
    /// restart policy normalization in [`normalized_pod_spec`](IrService::normalized_pod_spec).
    pub pod_spec: PodSpec,
    /// Annotation hints collected from the source artifacts.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    /// Desired replica count for target kinds that scale horizontally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

impl IrService {
    /// New workload around a pod template.
    pub fn new(name: &str, pod_spec: PodSpec) -> Self {
        Self {
            name: name.to_string(),
            pod_spec,
            ..Default::default()
        }
    }

    /// A copy of the pod spec normalized for managed workloads.
    ///
    /// Controller-managed and serverless kinds require `restartPolicy: Always`;
    /// whatever the source artifacts specified is overridden on the copy, and
    /// the IR itself is left untouched.
    pub fn normalized_pod_spec(&self) -> PodSpec {
        let mut spec = self.pod_spec.clone();
        spec.restart_policy = Some("Always".to_string());
        spec
    }
}

/// Ordered collection of workloads for one application.
///
/// Service names are assumed unique; this layer does not enforce it, and a
/// violation shows up downstream as resource name collisions.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Ir {
    /// Application name.
    pub name: String,
    /// The workloads, in source order.
    pub services: Vec<IrService>,
}

impl Ir {
    /// Empty IR for an application.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            services: Vec::new(),
        }
    }
}
