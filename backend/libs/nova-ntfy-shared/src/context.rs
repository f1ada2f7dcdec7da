//! Cancellation and deadline handling for a single send
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::TransportError;

/// Caller-owned context bounding one send operation.
///
/// Cancelling the token or reaching the deadline aborts the in-flight request.
#[derive(Debug, Clone, Default)]
pub struct SendContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl SendContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Drive `future` to completion unless the context finishes first.
    ///
    /// A context that is already done never polls `future`.
    pub async fn run<F, T>(&self, future: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(TransportError::Cancelled),
            _ = deadline => Err(TransportError::DeadlineExceeded),
            result = future => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_run_completes() {
        let ctx = SendContext::background();
        let result = ctx.run(async { Ok::<_, TransportError>(42) }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_cancelled_context_never_polls() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = SendContext::with_cancellation(token);

        let polled = Arc::new(AtomicBool::new(false));
        let flag = polled.clone();
        let result = ctx
            .run(async move {
                flag.store(true, Ordering::SeqCst);
                Ok::<_, TransportError>(())
            })
            .await;

        assert_eq!(result, Err(TransportError::Cancelled));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = SendContext::background().with_timeout(Duration::from_millis(10));
        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, TransportError>(())
            })
            .await;

        assert_eq!(result, Err(TransportError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_cancel_in_flight() {
        let token = CancellationToken::new();
        let ctx = SendContext::with_cancellation(token.clone());

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let result = ctx
            .run(std::future::pending::<Result<(), TransportError>>())
            .await;
        assert_eq!(result, Err(TransportError::Cancelled));
    }
}
