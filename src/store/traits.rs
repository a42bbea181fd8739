use serde_json::Map;
use serde_json::Value;

/// Hierarchical document store addressed by slash-separated paths.
///
/// Reads return point-in-time snapshots. The only isolation guarantee is
/// [`Store::swap`], an atomic compare-and-swap on a whole subtree, which is
/// what role assignment and matching build their read-modify-write loops on.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Whole-subtree read. None if nothing is stored at the path.
    async fn get(&self, path: &str) -> anyhow::Result<Option<Value>>;

    /// Whole-key write, creating intermediate objects as needed.
    async fn set(&self, path: &str, value: Value) -> anyhow::Result<()>;

    /// Shallow merge of `fields` into the object at the path.
    async fn merge(&self, path: &str, fields: Map<String, Value>) -> anyhow::Result<()>;

    /// Whole-subtree delete. Deleting an absent path is not an error.
    async fn delete(&self, path: &str) -> anyhow::Result<()>;

    /// Replace the subtree at `path` with `value` only if it currently equals
    /// `expected`. None stands for "absent" on either side. Returns whether
    /// the swap happened.
    async fn swap(
        &self,
        path: &str,
        expected: Option<Value>,
        value: Option<Value>,
    ) -> anyhow::Result<bool>;
}
