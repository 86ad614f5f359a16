//! Plain Service generator.
use k8s_openapi::{
    api::core::v1::{PodSpec, Service, ServicePort, ServiceSpec},
    apimachinery::pkg::{apis::meta::v1::ObjectMeta, util::intstr::IntOrString},
};
use kubeport_core::{metadata, Ir, Kind, ManifestObject};

use crate::generator::ResourceGenerator;

/// Generates `core/v1` Services selecting each workload's pods by the app label.
///
/// Ports come straight from the workload's container ports. A Service is a
/// routing primitive with no meaningful downgrade, so conversion either passes
/// it through or declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceGenerator;

impl ResourceGenerator for ServiceGenerator {
    fn owned_kinds(&self) -> &'static [Kind] {
        &[Kind::Service]
    }

    fn generate(&self, ir: &Ir, _supported: &[Kind]) -> Vec<ManifestObject> {
        ir.services
            .iter()
            .map(|svc| service_from_parts(metadata::object_meta(svc), &svc.pod_spec).into())
            .collect()
    }

    fn convert(
        &self,
        obj: &ManifestObject,
        supported: &[Kind],
        _siblings: &[ManifestObject],
    ) -> Option<Vec<ManifestObject>> {
        let ManifestObject::Service(_) = obj else {
            return None;
        };
        if supported.contains(&Kind::Service) {
            return Some(vec![obj.clone()]);
        }
        None
    }
}

/// A Service whose selector reuses the labels already present on `meta` and
/// whose ports mirror the pod's container ports.
pub(crate) fn service_from_parts(meta: ObjectMeta, pod_spec: &PodSpec) -> Service {
    let ports: Vec<ServicePort> = pod_spec
        .containers
        .iter()
        .flat_map(|c| c.ports.iter().flatten())
        .map(|p| ServicePort {
            name: p.name.clone(),
            port: p.container_port,
            target_port: Some(IntOrString::Int(p.container_port)),
            protocol: p.protocol.clone(),
            ..Default::default()
        })
        .collect();
    let selector = meta.labels.clone();
    Service {
        metadata: meta,
        spec: Some(ServiceSpec {
            selector,
            ports: if ports.is_empty() { None } else { Some(ports) },
            ..Default::default()
        }),
        ..Default::default()
    }
}
