//! Target cluster capability metadata.
//!
//! How the supported kinds of a cluster are discovered is outside this crate;
//! collection tooling hands over a kind list and this type holds it, read-only,
//! for the duration of a transform run.
use serde::{Deserialize, Serialize};

use crate::{error::Error, gvk::Kind};

/// The set of resource kinds a target cluster accepts.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterCapabilities {
    supported: Vec<Kind>,
}

impl ClusterCapabilities {
    /// Capability set from an explicit kind list, keeping declaration order.
    pub fn new(supported: Vec<Kind>) -> Self {
        Self { supported }
    }

    /// Parse the kind identifier strings produced by cluster collection.
    pub fn from_kind_names<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let supported = names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(supported))
    }

    /// Whether `kind` may appear in the final manifest set.
    pub fn supports(&self, kind: Kind) -> bool {
        self.supported.contains(&kind)
    }

    /// The supported kinds in declaration order.
    pub fn kinds(&self) -> &[Kind] {
        &self.supported
    }
}
