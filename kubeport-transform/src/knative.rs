//! Knative serving service generator and its decomposition fallback.
use kubeport_core::{metadata, object::KnativeService, Ir, Kind, ManifestObject};

use crate::{
    deployment::{deployment_from_parts, DeploymentGenerator, DEFAULT_REPLICAS},
    generator::{has_sibling, ResourceGenerator},
    service::service_from_parts,
};

/// Generates serving services; on clusters without the serving API it
/// decomposes them into a Deployment plus a plain Service.
///
/// The decomposed workload rides the Deployment downgrade ladder, so a
/// cluster that only knows ReplicationControllers or bare Pods still gets a
/// placement. The decomposition only succeeds when the revision workload
/// lands somewhere; a routing Service alone would select nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct KnativeServiceGenerator;

impl ResourceGenerator for KnativeServiceGenerator {
    fn owned_kinds(&self) -> &'static [Kind] {
        &[Kind::KnativeService]
    }

    fn generate(&self, ir: &Ir, _supported: &[Kind]) -> Vec<ManifestObject> {
        ir.services
            .iter()
            .map(|svc| {
                KnativeService::new(metadata::object_meta(svc), svc.normalized_pod_spec()).into()
            })
            .collect()
    }

    fn convert(
        &self,
        obj: &ManifestObject,
        supported: &[Kind],
        siblings: &[ManifestObject],
    ) -> Option<Vec<ManifestObject>> {
        let ManifestObject::KnativeService(ks) = obj else {
            return None;
        };
        if supported.contains(&Kind::KnativeService) {
            return Some(vec![obj.clone()]);
        }

        let name = obj.name_any();
        let pod_spec = ks.spec.template.spec.pod_spec.clone();
        let mut out = Vec::new();

        let mut workload_placed = has_sibling(siblings, Kind::Deployment, &name);
        if !workload_placed {
            let deployment: ManifestObject =
                deployment_from_parts(ks.metadata.clone(), pod_spec.clone(), DEFAULT_REPLICAS).into();
            if let Some(objs) = DeploymentGenerator.convert(&deployment, supported, siblings) {
                out.extend(objs);
                workload_placed = true;
            }
        }
        if !workload_placed {
            return None;
        }

        if supported.contains(&Kind::Service) && !has_sibling(siblings, Kind::Service, &name) {
            out.push(service_from_parts(ks.metadata.clone(), &pod_spec).into());
        }
        Some(out)
    }
}

#[cfg(test)]
mod test {
    use super::KnativeServiceGenerator;
    use crate::{deployment::DeploymentGenerator, generator::ResourceGenerator, service::ServiceGenerator};
    use kubeport_core::{Ir, IrService, Kind, ManifestObject};
    use k8s_openapi::api::core::v1::{Container, ContainerPort, PodSpec};

    fn web_ir() -> Ir {
        let mut ir = Ir::new("app");
        ir.services.push(IrService::new(
            "web",
            PodSpec {
                containers: vec![Container {
                    name: "web".into(),
                    image: Some("nginx:1.27".into()),
                    ports: Some(vec![ContainerPort {
                        container_port: 80,
                        ..Default::default()
                    }]),
                    ..Default::default()
                }],
                restart_policy: Some("OnFailure".into()),
                ..Default::default()
            },
        ));
        ir
    }

    fn generated(ir: &Ir) -> Vec<ManifestObject> {
        KnativeServiceGenerator.generate(ir, &[])
    }

    #[test]
    fn generates_one_serving_service_per_workload() {
        let ir = web_ir();
        let objs = generated(&ir);
        assert_eq!(objs.len(), ir.services.len());
        let ManifestObject::KnativeService(ks) = &objs[0] else {
            panic!("expected a serving service");
        };
        assert_eq!(ks.metadata.name.as_deref(), Some("web"));
        assert_eq!(
            ks.spec.template.spec.pod_spec.restart_policy.as_deref(),
            Some("Always")
        );
        assert_eq!(
            ks.metadata.labels.as_ref().unwrap().get("app").map(String::as_str),
            Some("web")
        );
    }

    #[test]
    fn supported_serving_api_passes_through_unchanged() {
        let ir = web_ir();
        let objs = generated(&ir);
        let supported = [Kind::KnativeService, Kind::Deployment, Kind::Service];
        let out = KnativeServiceGenerator.convert(&objs[0], &supported, &objs).unwrap();
        assert_eq!(out, vec![objs[0].clone()]);
        let again = KnativeServiceGenerator.convert(&out[0], &supported, &objs).unwrap();
        assert_eq!(again, out);
    }

    #[test]
    fn declines_objects_of_other_kinds() {
        let ir = web_ir();
        let objs = generated(&ir);
        let deployment = DeploymentGenerator.generate(&ir, &[]).remove(0);
        assert_eq!(
            KnativeServiceGenerator.convert(&deployment, &[Kind::Deployment], &objs),
            None
        );
    }

    #[test]
    fn decomposes_into_deployment_and_service() {
        let ir = web_ir();
        let objs = generated(&ir);
        let supported = [Kind::Deployment, Kind::Service];
        let out = KnativeServiceGenerator.convert(&objs[0], &supported, &objs).unwrap();
        assert_eq!(out.len(), 2);

        let ManifestObject::Deployment(d) = &out[0] else {
            panic!("expected a deployment first");
        };
        let d_spec = d.spec.as_ref().unwrap();
        let labels = d_spec.selector.match_labels.as_ref().unwrap();
        assert_eq!(labels.get("app").map(String::as_str), Some("web"));
        assert_eq!(
            d_spec
                .template
                .spec
                .as_ref()
                .unwrap()
                .restart_policy
                .as_deref(),
            Some("Always")
        );

        let ManifestObject::Service(svc) = &out[1] else {
            panic!("expected a service second");
        };
        let s_spec = svc.spec.as_ref().unwrap();
        // the service selects exactly what the deployment labels
        assert_eq!(s_spec.selector.as_ref(), Some(labels));
        assert_eq!(s_spec.ports.as_ref().unwrap()[0].port, 80);
    }

    #[test]
    fn decomposed_workload_rides_the_deployment_ladder() {
        let ir = web_ir();
        let objs = generated(&ir);
        let out = KnativeServiceGenerator
            .convert(&objs[0], &[Kind::Pod, Kind::Service], &objs)
            .unwrap();
        let kinds: Vec<_> = out.iter().map(|o| o.kind()).collect();
        assert_eq!(kinds, [Kind::Pod, Kind::Service]);
    }

    #[test]
    fn unplaceable_workload_fails_the_decomposition() {
        let ir = web_ir();
        let objs = generated(&ir);
        // a routing service alone would select nothing
        assert_eq!(
            KnativeServiceGenerator.convert(&objs[0], &[Kind::Service], &objs),
            None
        );
        assert_eq!(KnativeServiceGenerator.convert(&objs[0], &[], &objs), None);
    }

    #[test]
    fn sibling_objects_are_not_duplicated() {
        let ir = web_ir();
        let mut siblings = generated(&ir);
        siblings.extend(DeploymentGenerator.generate(&ir, &[]));

        let supported = [Kind::Deployment, Kind::Service];
        let out = KnativeServiceGenerator
            .convert(&siblings[0], &supported, &siblings)
            .unwrap();
        // the sibling deployment already carries the workload
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind(), Kind::Service);

        siblings.extend(ServiceGenerator.generate(&ir, &[]));
        let out = KnativeServiceGenerator
            .convert(&siblings[0], &supported, &siblings)
            .unwrap();
        assert!(out.is_empty());
    }
}
