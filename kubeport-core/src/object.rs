//! The closed set of manifest objects generators can emit.
//!
//! Workload kinds from the apps and core groups come typed from `k8s-openapi`;
//! the Knative serving types are defined here since the serving API has no
//! upstream Rust bindings.
use k8s_openapi::{
    api::{
        apps::v1::Deployment,
        core::v1::{Pod, PodSpec, ReplicationController, Service},
    },
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use serde::{Deserialize, Serialize};

use crate::{gvk::Kind, metadata::TypeMeta};

/// A Knative serving Service manifest.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct KnativeService {
    /// The type fields
    #[serde(flatten)]
    pub types: TypeMeta,
    /// Object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired state of the serving service.
    pub spec: KnativeServiceSpec,
}

impl KnativeService {
    /// Construct a serving service wrapping `pod_spec` in a revision template.
    pub fn new(metadata: ObjectMeta, pod_spec: PodSpec) -> Self {
        Self {
            types: TypeMeta::from(&Kind::KnativeService.group_version_kind()),
            metadata,
            spec: KnativeServiceSpec {
                template: RevisionTemplateSpec {
                    metadata: None,
                    spec: RevisionSpec {
                        pod_spec,
                        container_concurrency: None,
                        timeout_seconds: None,
                    },
                },
            },
        }
    }
}

/// Desired state of a serving service: the configuration's revision template.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct KnativeServiceSpec {
    /// Template for the revisions stamped out for this service.
    pub template: RevisionTemplateSpec,
}

/// Template from which serving revisions are created.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct RevisionTemplateSpec {
    /// Optional revision metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// The revision's desired state.
    pub spec: RevisionSpec,
}

/// One revision: a pod spec plus the serving scaling knobs.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSpec {
    /// The workload's pod spec, inlined the way the serving API expects.
    #[serde(flatten)]
    pub pod_spec: PodSpec,
    /// Maximum in-flight requests per revision instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_concurrency: Option<i64>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,
}

/// A generated, strongly typed manifest object tagged by [`Kind`].
///
/// Created fresh per generator invocation and never mutated afterwards;
/// capability conversion replaces objects wholesale instead of editing them.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ManifestObject {
    /// Serverless service under `serving.knative.dev/v1`
    KnativeService(KnativeService),
    /// `apps/v1` Deployment
    Deployment(Deployment),
    /// `core/v1` ReplicationController
    ReplicationController(ReplicationController),
    /// `core/v1` Pod
    Pod(Pod),
    /// `core/v1` Service
    Service(Service),
}

impl ManifestObject {
    /// Kind tag of the wrapped object.
    pub fn kind(&self) -> Kind {
        match self {
            ManifestObject::KnativeService(_) => Kind::KnativeService,
            ManifestObject::Deployment(_) => Kind::Deployment,
            ManifestObject::ReplicationController(_) => Kind::ReplicationController,
            ManifestObject::Pod(_) => Kind::Pod,
            ManifestObject::Service(_) => Kind::Service,
        }
    }

    /// The apiVersion/kind pair emitted in this object's manifest.
    pub fn type_meta(&self) -> TypeMeta {
        TypeMeta::from(&self.kind().group_version_kind())
    }

    /// Object metadata.
    pub fn meta(&self) -> &ObjectMeta {
        match self {
            ManifestObject::KnativeService(o) => &o.metadata,
            ManifestObject::Deployment(o) => &o.metadata,
            ManifestObject::ReplicationController(o) => &o.metadata,
            ManifestObject::Pod(o) => &o.metadata,
            ManifestObject::Service(o) => &o.metadata,
        }
    }

    /// The object name, or an empty string when unset.
    pub fn name_any(&self) -> String {
        self.meta().name.clone().unwrap_or_default()
    }

    /// The complete manifest as a JSON value, for downstream writers.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl From<KnativeService> for ManifestObject {
    fn from(o: KnativeService) -> Self {
        ManifestObject::KnativeService(o)
    }
}

impl From<Deployment> for ManifestObject {
    fn from(o: Deployment) -> Self {
        ManifestObject::Deployment(o)
    }
}

impl From<ReplicationController> for ManifestObject {
    fn from(o: ReplicationController) -> Self {
        ManifestObject::ReplicationController(o)
    }
}

impl From<Pod> for ManifestObject {
    fn from(o: Pod) -> Self {
        ManifestObject::Pod(o)
    }
}

impl From<Service> for ManifestObject {
    fn from(o: Service) -> Self {
        ManifestObject::Service(o)
    }
}
