//! Serde adapter for `Arc`-shared plan children.
//!
//! Plan nodes hold their inputs as `Arc<LogicalPlan>`; on the wire a child is
//! written as the plain node it points to. Use with
//! `#[serde(with = "crate::utils::serde_arc")]`.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S, T>(node: &Arc<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    node.as_ref().serialize(serializer)
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Arc<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Arc::new)
}
