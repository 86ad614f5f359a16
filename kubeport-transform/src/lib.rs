//! Resource generators and the capability negotiation that degrades their
//! output to kinds a target cluster supports.
//!
//! Each generator owns exactly one kind: it produces objects of that kind from
//! the IR, and it alone knows how to rewrite them into supported substitutes
//! when the native kind is unavailable on the target. The [`Registry`] drives
//! both steps over a whole IR.
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod generator;
pub use generator::{Registry, ResourceGenerator, Transformed};

pub mod deployment;
pub use deployment::DeploymentGenerator;

pub mod knative;
pub use knative::KnativeServiceGenerator;

pub mod service;
pub use service::ServiceGenerator;
