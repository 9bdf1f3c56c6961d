use async_trait::async_trait;

/// Presentation-cache invalidation seam.
///
/// Implementations signal that cached output for `path` is stale and must be
/// regenerated. The service calls this after successful mutations only,
/// fire-and-forget; reads never trigger it.
#[async_trait]
pub trait Revalidator: Send + Sync {
    async fn revalidate(&self, path: &str);
}

/// Hook for deployments without a presentation cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevalidator;

#[async_trait]
impl Revalidator for NoopRevalidator {
    async fn revalidate(&self, _path: &str) {}
}
