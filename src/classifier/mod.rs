//! Resource classification and cross-reference indexing.
//!
//! The classifier splits a heterogeneous record list into the three
//! evaluated resource groups. The resource-group index joins virtual
//! machines to the network security groups that share their group.

mod classify;
mod index;

pub use classify::{classify, ClassifiedResources};
pub use index::ResourceGroupIndex;
