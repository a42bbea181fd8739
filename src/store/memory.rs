use super::*;
use serde_json::Map;
use serde_json::Value;
use tokio::sync::RwLock;

/// In-process document tree.
///
/// A single lock around the whole tree makes every operation, including
/// [`Store::swap`], linearizable. Writing `null` is the same as deleting.
#[derive(Debug)]
pub struct Memory {
    root: RwLock<Value>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            root: RwLock::new(Value::Object(Map::new())),
        }
    }
}

impl Memory {
    /// Full copy of the tree, for inspection in tests and dumps.
    pub async fn dump(&self) -> Value {
        self.root.read().await.clone()
    }

    fn find<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
        segments(path)
            .into_iter()
            .try_fold(root, |node, key| node.as_object().and_then(|map| map.get(key)))
            .filter(|node| !node.is_null())
    }

    fn write(root: &mut Value, path: &str, value: Value) {
        if value.is_null() {
            return Self::remove(root, path);
        }
        let keys = segments(path);
        let Some((last, parents)) = keys.split_last() else {
            *root = value;
            return;
        };
        let parent = parents.iter().fold(root, |node, key| {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            node.as_object_mut()
                .map(|map| map.entry(key.to_string()).or_insert(Value::Null))
                .expect("coerced to object")
        });
        if !parent.is_object() {
            *parent = Value::Object(Map::new());
        }
        if let Some(map) = parent.as_object_mut() {
            map.insert(last.to_string(), value);
        }
    }

    fn remove(root: &mut Value, path: &str) {
        let keys = segments(path);
        let Some((last, parents)) = keys.split_last() else {
            *root = Value::Object(Map::new());
            return;
        };
        let parent = parents
            .iter()
            .try_fold(root, |node, key| node.as_object_mut().and_then(|map| map.get_mut(*key)));
        if let Some(map) = parent.and_then(Value::as_object_mut) {
            map.shift_remove(*last);
        }
    }
}

#[async_trait::async_trait]
impl Store for Memory {
    async fn get(&self, path: &str) -> anyhow::Result<Option<Value>> {
        let root = self.root.read().await;
        Ok(Self::find(&root, path).cloned())
    }

    async fn set(&self, path: &str, value: Value) -> anyhow::Result<()> {
        let mut root = self.root.write().await;
        Self::write(&mut root, path, value);
        Ok(())
    }

    async fn merge(&self, path: &str, fields: Map<String, Value>) -> anyhow::Result<()> {
        let mut root = self.root.write().await;
        let mut object = match Self::find(&root, path) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        object.extend(fields);
        Self::write(&mut root, path, Value::Object(object));
        Ok(())
    }

    async fn delete(&self, path: &str) -> anyhow::Result<()> {
        let mut root = self.root.write().await;
        Self::remove(&mut root, path);
        Ok(())
    }

    async fn swap(
        &self,
        path: &str,
        expected: Option<Value>,
        value: Option<Value>,
    ) -> anyhow::Result<bool> {
        let mut root = self.root.write().await;
        if Self::find(&root, path) != expected.as_ref() {
            log::debug!("swap on {} lost to a concurrent writer", path);
            return Ok(false);
        }
        match value {
            Some(value) => Self::write(&mut root, path, value),
            None => Self::remove(&mut root, path),
        }
        Ok(true)
    }
}
