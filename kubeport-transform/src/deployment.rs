//! Deployment generator and its downgrade ladder.
use k8s_openapi::{
    api::{
        apps::v1::{Deployment, DeploymentSpec},
        core::v1::{Pod, PodSpec, PodTemplateSpec, ReplicationController, ReplicationControllerSpec},
    },
    apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta},
};
use kubeport_core::{metadata, Ir, Kind, ManifestObject};

use crate::generator::ResourceGenerator;

/// Replica count applied when the IR does not state one.
pub(crate) const DEFAULT_REPLICAS: i32 = 2;

/// Generates `apps/v1` Deployments and owns their degradation on clusters
/// without the apps API.
///
/// The ladder prefers the most capability-preserving substitute: a
/// ReplicationController keeps replica management, a bare Pod is the last
/// resort and drops it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeploymentGenerator;

impl ResourceGenerator for DeploymentGenerator {
    fn owned_kinds(&self) -> &'static [Kind] {
        &[Kind::Deployment]
    }

    fn generate(&self, ir: &Ir, _supported: &[Kind]) -> Vec<ManifestObject> {
        ir.services
            .iter()
            .map(|svc| {
                deployment_from_parts(
                    metadata::object_meta(svc),
                    svc.normalized_pod_spec(),
                    svc.replicas.unwrap_or(DEFAULT_REPLICAS),
                )
                .into()
            })
            .collect()
    }

    fn convert(
        &self,
        obj: &ManifestObject,
        supported: &[Kind],
        _siblings: &[ManifestObject],
    ) -> Option<Vec<ManifestObject>> {
        let ManifestObject::Deployment(deployment) = obj else {
            return None;
        };
        if supported.contains(&Kind::Deployment) {
            return Some(vec![obj.clone()]);
        }
        if supported.contains(&Kind::ReplicationController) {
            return Some(vec![controller_from_deployment(deployment).into()]);
        }
        if supported.contains(&Kind::Pod) {
            return Some(vec![pod_from_deployment(deployment).into()]);
        }
        None
    }
}

/// A Deployment selecting its pods by the labels already present on `meta`.
pub(crate) fn deployment_from_parts(meta: ObjectMeta, pod_spec: PodSpec, replicas: i32) -> Deployment {
    let labels = meta.labels.clone();
    Deployment {
        metadata: meta,
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            selector: LabelSelector {
                match_labels: labels.clone(),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels,
                    ..Default::default()
                }),
                spec: Some(pod_spec),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn controller_from_deployment(deployment: &Deployment) -> ReplicationController {
    let spec = deployment.spec.clone().unwrap_or_default();
    ReplicationController {
        metadata: deployment.metadata.clone(),
        spec: Some(ReplicationControllerSpec {
            replicas: spec.replicas,
            selector: spec.selector.match_labels,
            template: Some(spec.template),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn pod_from_deployment(deployment: &Deployment) -> Pod {
    Pod {
        metadata: deployment.metadata.clone(),
        spec: deployment.spec.as_ref().and_then(|s| s.template.spec.clone()),
        ..Default::default()
    }
}

#[cfg(test)]
mod test {
    use super::{DeploymentGenerator, DEFAULT_REPLICAS};
    use crate::generator::ResourceGenerator;
    use kubeport_core::{Ir, IrService, Kind, ManifestObject};
    use k8s_openapi::api::core::v1::{Container, PodSpec};

    fn two_service_ir() -> Ir {
        let mut ir = Ir::new("app");
        for name in ["web", "worker"] {
            ir.services.push(IrService::new(
                name,
                PodSpec {
                    containers: vec![Container {
                        name: name.into(),
                        image: Some("busybox".into()),
                        ..Default::default()
                    }],
                    restart_policy: Some("Never".into()),
                    ..Default::default()
                },
            ));
        }
        ir
    }

    fn generated(ir: &Ir) -> Vec<ManifestObject> {
        DeploymentGenerator.generate(ir, &[])
    }

    #[test]
    fn generates_one_named_deployment_per_service() {
        let ir = two_service_ir();
        let objs = generated(&ir);
        assert_eq!(objs.len(), ir.services.len());
        let names: Vec<_> = objs.iter().map(|o| o.name_any()).collect();
        assert_eq!(names, ["web", "worker"]);
        for obj in &objs {
            assert_eq!(obj.kind(), Kind::Deployment);
        }
    }

    #[test]
    fn pod_template_is_normalized_and_selectable() {
        let ir = two_service_ir();
        let objs = generated(&ir);
        let ManifestObject::Deployment(d) = &objs[0] else {
            panic!("expected a deployment");
        };
        let spec = d.spec.as_ref().unwrap();
        assert_eq!(spec.replicas, Some(DEFAULT_REPLICAS));
        let template = &spec.template;
        let pod_spec = template.spec.as_ref().unwrap();
        assert_eq!(pod_spec.restart_policy.as_deref(), Some("Always"));
        assert_eq!(
            spec.selector.match_labels,
            template.metadata.as_ref().unwrap().labels
        );
        // the IR itself keeps its original policy
        assert_eq!(ir.services[0].pod_spec.restart_policy.as_deref(), Some("Never"));
    }

    #[test]
    fn replica_hint_from_the_ir_wins() {
        let mut ir = two_service_ir();
        ir.services[0].replicas = Some(5);
        let ManifestObject::Deployment(d) = &generated(&ir)[0] else {
            panic!("expected a deployment");
        };
        assert_eq!(d.spec.as_ref().unwrap().replicas, Some(5));
    }

    #[test]
    fn supported_deployment_passes_through_unchanged() {
        let ir = two_service_ir();
        let objs = generated(&ir);
        let supported = [Kind::Deployment, Kind::Pod];
        let out = DeploymentGenerator.convert(&objs[0], &supported, &objs).unwrap();
        assert_eq!(out, vec![objs[0].clone()]);
        // converting the result again is a no-op
        let again = DeploymentGenerator.convert(&out[0], &supported, &objs).unwrap();
        assert_eq!(again, out);
    }

    #[test]
    fn ladder_prefers_replication_controller_over_pod() {
        let ir = two_service_ir();
        let objs = generated(&ir);
        let supported = [Kind::ReplicationController, Kind::Pod];
        let out = DeploymentGenerator.convert(&objs[0], &supported, &objs).unwrap();
        assert_eq!(out.len(), 1);
        let ManifestObject::ReplicationController(rc) = &out[0] else {
            panic!("expected a replication controller");
        };
        let spec = rc.spec.as_ref().unwrap();
        assert_eq!(spec.replicas, Some(DEFAULT_REPLICAS));
        assert_eq!(
            spec.selector.as_ref().unwrap().get("app").map(String::as_str),
            Some("web")
        );
    }

    #[test]
    fn ladder_bottoms_out_at_a_bare_pod() {
        let ir = two_service_ir();
        let objs = generated(&ir);
        let out = DeploymentGenerator.convert(&objs[1], &[Kind::Pod], &objs).unwrap();
        let ManifestObject::Pod(pod) = &out[0] else {
            panic!("expected a pod");
        };
        assert_eq!(pod.metadata.name.as_deref(), Some("worker"));
        assert_eq!(
            pod.spec.as_ref().unwrap().restart_policy.as_deref(),
            Some("Always")
        );
    }

    #[test]
    fn declines_foreign_kinds_and_empty_ladders() {
        let ir = two_service_ir();
        let objs = generated(&ir);
        // nothing usable on the cluster
        assert_eq!(DeploymentGenerator.convert(&objs[0], &[Kind::Service], &objs), None);
        // not our kind
        let foreign = crate::service::ServiceGenerator.generate(&ir, &[]).remove(0);
        assert_eq!(
            DeploymentGenerator.convert(&foreign, &[Kind::Deployment], &objs),
            None
        );
    }
}
