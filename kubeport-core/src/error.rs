use thiserror::Error;

/// Errors surfaced by kind parsing and capability negotiation.
#[derive(Debug, Error)]
pub enum Error {
    /// A kind identifier from cluster metadata matched nothing this crate can emit.
    #[error("unknown resource kind: {0}")]
    UnknownKind(String),

    /// No generator could express an object in the cluster's supported kinds.
    #[error("no cluster supported kind can express: {0}")]
    Unconvertible(String),
}
