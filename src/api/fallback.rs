//! メトリクスごとのフォールバックチェーン
//!
//! 各メトリクスは「順序付きのデータソース列」として表現する。先頭から順に
//! 試し、最初に成功したソースの値を返す。すべて失敗した場合は固定の
//! デフォルト値に落ちる。リトライやバックオフは行わない（1ホップのみ）。
//! `resolve()`がエラーを返すことはなく、失敗はwarnログに落ちるだけで
//! スケジューラには伝播しない。

use futures_util::future::BoxFuture;

use super::client::FetchError;

type SourceFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync>;

struct Source<T> {
    name: &'static str,
    fetch: SourceFn<T>,
}

/// 順序付きデータソース列＋デフォルト値
pub struct FallbackChain<T> {
    metric: &'static str,
    sources: Vec<Source<T>>,
    default_value: T,
}

impl<T> FallbackChain<T> {
    pub fn new(metric: &'static str, default_value: T) -> Self {
        Self {
            metric,
            sources: Vec::new(),
            default_value,
        }
    }

    /// データソースを末尾に追加（追加順＝試行順）
    pub fn source<F>(mut self, name: &'static str, fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync + 'static,
    {
        self.sources.push(Source {
            name,
            fetch: Box::new(fetch),
        });
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// チェーンを解決する。必ず値を返す。
    pub async fn resolve(self) -> T {
        for source in &self.sources {
            match (source.fetch)().await {
                Ok(value) => {
                    tracing::debug!(
                        metric = self.metric,
                        source = source.name,
                        "✅ [FALLBACK] source succeeded"
                    );
                    return value;
                }
                Err(error) => {
                    tracing::warn!(
                        metric = self.metric,
                        source = source.name,
                        error = %error,
                        "⚠️ [FALLBACK] source failed, trying next"
                    );
                }
            }
        }

        tracing::warn!(
            metric = self.metric,
            "📉 [FALLBACK] all sources exhausted, using default"
        );
        self.default_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    fn failing(endpoint: &'static str) -> Result<u64, FetchError> {
        Err(FetchError::Status {
            endpoint: endpoint.to_string(),
            status: 500,
        })
    }

    #[tokio::test]
    async fn test_first_successful_source_wins() {
        let chain = FallbackChain::new("test-metric", 0u64)
            .source("primary", || async { Ok(1u64) }.boxed())
            .source("secondary", || async { Ok(2u64) }.boxed());
        assert_eq!(chain.resolve().await, 1);
    }

    #[tokio::test]
    async fn test_fallback_hop_after_primary_failure() {
        let chain = FallbackChain::new("test-metric", 0u64)
            .source("primary", || async { failing("/api/primary") }.boxed())
            .source("secondary", || async { Ok(2u64) }.boxed());
        assert_eq!(chain.resolve().await, 2);
    }

    #[tokio::test]
    async fn test_exhausted_chain_returns_default() {
        let chain = FallbackChain::new("test-metric", 99u64)
            .source("primary", || async { failing("/api/primary") }.boxed())
            .source("secondary", || async { failing("/api/secondary") }.boxed());
        assert_eq!(chain.resolve().await, 99);
    }

    #[tokio::test]
    async fn test_empty_chain_returns_default() {
        let chain: FallbackChain<&'static str> = FallbackChain::new("test-metric", "--");
        assert_eq!(chain.resolve().await, "--");
    }
}
