//! The generator contract and the registry that drives negotiation.
use kubeport_core::{ClusterCapabilities, Error, Ir, Kind, ManifestObject};
use tracing::{debug, warn};

use crate::{deployment::DeploymentGenerator, knative::KnativeServiceGenerator, service::ServiceGenerator};

/// A resource generator owning one manifest kind.
///
/// Generators are pure: both steps take fresh inputs and return fresh objects,
/// and nothing is mutated across invocations.
pub trait ResourceGenerator {
    /// The fixed kind set this generator owns. Constant per generator type.
    fn owned_kinds(&self) -> &'static [Kind];

    /// Construct one object of the owned kind per IR service.
    ///
    /// Objects are named after their service, labeled and annotated by the
    /// metadata builders, and carry the normalized pod spec where the kind
    /// embeds one. `supported` is advisory at this stage; negotiation proper
    /// happens in [`convert`](ResourceGenerator::convert).
    fn generate(&self, ir: &Ir, supported: &[Kind]) -> Vec<ManifestObject>;

    /// Rewrite `obj` into kinds the cluster supports.
    ///
    /// Returns `None` when the object is not of this generator's kind (the
    /// registry then tries the next generator) or when no meaningful downgrade
    /// exists. An owned kind that is already in `supported` passes through
    /// unchanged, so conversion is idempotent. `siblings` is the full set of
    /// objects generated for the same IR; fallbacks consult it to avoid
    /// duplicating a workload or service a sibling already provides.
    fn convert(
        &self,
        obj: &ManifestObject,
        supported: &[Kind],
        siblings: &[ManifestObject],
    ) -> Option<Vec<ManifestObject>>;
}

/// Whether `siblings` already contains an object of `kind` named `name`.
pub(crate) fn has_sibling(siblings: &[ManifestObject], kind: Kind, name: &str) -> bool {
    siblings
        .iter()
        .any(|o| o.kind() == kind && o.name_any() == name)
}

/// Output of a transform run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transformed {
    /// Objects expressed in cluster supported kinds, in generation order.
    pub objects: Vec<ManifestObject>,
    /// Objects no generator could express on this cluster.
    pub unplaced: Vec<ManifestObject>,
}

impl Transformed {
    /// The converted objects, failing when anything was left unplaced.
    pub fn into_objects(self) -> Result<Vec<ManifestObject>, Error> {
        if self.unplaced.is_empty() {
            Ok(self.objects)
        } else {
            let names = self
                .unplaced
                .iter()
                .map(|o| format!("{} {}", o.kind(), o.name_any()))
                .collect::<Vec<_>>()
                .join(", ");
            Err(Error::Unconvertible(names))
        }
    }
}

/// Ordered set of generators for one target flavor.
pub struct Registry {
    generators: Vec<Box<dyn ResourceGenerator>>,
}

impl Registry {
    /// Registry over an explicit generator list.
    pub fn new(generators: Vec<Box<dyn ResourceGenerator>>) -> Self {
        Self { generators }
    }

    /// Generators for a serverless-first target.
    ///
    /// The serving generator handles its own decomposition, so it is the only
    /// member; clusters without the serving API still get Deployment + Service
    /// output through conversion.
    pub fn serverless() -> Self {
        Self::new(vec![Box::new(KnativeServiceGenerator)])
    }

    /// Generators for a plain Kubernetes target.
    pub fn kubernetes() -> Self {
        Self::new(vec![Box::new(DeploymentGenerator), Box::new(ServiceGenerator)])
    }

    /// Generate every registered kind over `ir`, then negotiate each object
    /// down to the kinds in `caps`.
    ///
    /// Unconvertible objects do not abort the run; they are collected in
    /// [`Transformed::unplaced`] and reported once at the end.
    pub fn transform(&self, ir: &Ir, caps: &ClusterCapabilities) -> Transformed {
        let supported = caps.kinds();

        let mut generated = Vec::new();
        for generator in &self.generators {
            let objs = generator.generate(ir, supported);
            debug!(
                kinds = ?generator.owned_kinds(),
                count = objs.len(),
                "generated native objects"
            );
            generated.extend(objs);
        }

        let mut out = Transformed::default();
        for obj in &generated {
            match self.convert_any(obj, supported, &generated) {
                Some(converted) => out.objects.extend(converted),
                None => {
                    warn!(
                        kind = %obj.kind(),
                        name = %obj.name_any(),
                        "no generator could convert object to a cluster supported kind"
                    );
                    out.unplaced.push(obj.clone());
                }
            }
        }
        out
    }

    fn convert_any(
        &self,
        obj: &ManifestObject,
        supported: &[Kind],
        siblings: &[ManifestObject],
    ) -> Option<Vec<ManifestObject>> {
        self.generators
            .iter()
            .find_map(|g| g.convert(obj, supported, siblings))
    }
}
