use super::*;
use serde_json::Map;
use serde_json::Value;

/// [`Memory`] that hands control back to the scheduler before every call,
/// like a round trip to a remote store. On a multi-threaded runtime this
/// lets concurrent read-modify-write loops interleave between `get` and `swap`.
#[derive(Debug, Default)]
pub struct Yielding(Memory);

#[async_trait::async_trait]
impl Store for Yielding {
    async fn get(&self, path: &str) -> anyhow::Result<Option<Value>> {
        tokio::task::yield_now().await;
        self.0.get(path).await
    }
    async fn set(&self, path: &str, value: Value) -> anyhow::Result<()> {
        tokio::task::yield_now().await;
        self.0.set(path, value).await
    }
    async fn merge(&self, path: &str, fields: Map<String, Value>) -> anyhow::Result<()> {
        tokio::task::yield_now().await;
        self.0.merge(path, fields).await
    }
    async fn delete(&self, path: &str) -> anyhow::Result<()> {
        tokio::task::yield_now().await;
        self.0.delete(path).await
    }
    async fn swap(
        &self,
        path: &str,
        expected: Option<Value>,
        value: Option<Value>,
    ) -> anyhow::Result<bool> {
        tokio::task::yield_now().await;
        self.0.swap(path, expected, value).await
    }
}

/// [`Memory`] on which every swap of one of the listed paths loses, as if
/// another writer always got there first.
#[derive(Debug, Default)]
pub struct Contended {
    inner: Memory,
    losing: Vec<String>,
}

impl Contended {
    pub fn new(losing: &[&str]) -> Self {
        Self {
            inner: Memory::default(),
            losing: losing.iter().map(|path| path.to_string()).collect(),
        }
    }
}

#[async_trait::async_trait]
impl Store for Contended {
    async fn get(&self, path: &str) -> anyhow::Result<Option<Value>> {
        self.inner.get(path).await
    }
    async fn set(&self, path: &str, value: Value) -> anyhow::Result<()> {
        self.inner.set(path, value).await
    }
    async fn merge(&self, path: &str, fields: Map<String, Value>) -> anyhow::Result<()> {
        self.inner.merge(path, fields).await
    }
    async fn delete(&self, path: &str) -> anyhow::Result<()> {
        self.inner.delete(path).await
    }
    async fn swap(
        &self,
        path: &str,
        expected: Option<Value>,
        value: Option<Value>,
    ) -> anyhow::Result<bool> {
        match self.losing.iter().any(|losing| losing == path) {
            true => Ok(false),
            false => self.inner.swap(path, expected, value).await,
        }
    }
}
