//! Upstream provider fetch operations for the gridmix system.
//!
//! Each provider drives an injected transport collaborator against its real
//! endpoints and runs the `grid-reconcile` normalization over the returned
//! documents. Operations are synchronous and stateless: every invocation
//! rebuilds its intermediates from scratch.

pub mod cammesa;
pub mod ceps;

pub use cammesa::Cammesa;
pub use ceps::Ceps;
