//! Crate with the shared types for turning an application IR into Kubernetes objects
//!
//! This crate carries everything the resource generators in `kubeport-transform`
//! agree on: the intermediate representation of a workload, the closed set of
//! resource kinds the system can emit, the manifest object wrapper, and the
//! capability metadata of a target cluster. It never talks to an apiserver.
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod cluster;
pub use cluster::ClusterCapabilities;

mod error;
pub use error::Error;

pub mod gvk;
pub use gvk::{GroupVersionKind, Kind};

pub mod ir;
pub use ir::{Ir, IrService};

pub mod metadata;
pub use metadata::TypeMeta;

pub mod object;
pub use object::ManifestObject;

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
