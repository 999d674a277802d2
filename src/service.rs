use {
    crate::{ObjectRequest, SignedRequest, SignerConfig},
    chrono::{DateTime, Utc},
    std::{
        fmt::{Debug, Formatter, Result as FmtResult},
        future::{ready, Ready},
        sync::Arc,
        task::{Context, Poll},
    },
    tower::{BoxError, Service},
};

/// A [`Service`] that signs [`ObjectRequest`]s against a shared [`SignerConfig`].
///
/// Signing never blocks, so the service is always ready and its futures complete immediately.
/// The clock is injected so callers (and tests) control the timestamp that ends up in the
/// signature.
#[derive(Clone)]
pub struct SigningService<C = fn() -> DateTime<Utc>> {
    config: Arc<SignerConfig>,
    clock: C,
}

impl SigningService {
    /// Create a signing service that timestamps requests with the system clock.
    pub fn new(config: SignerConfig) -> Self {
        Self {
            config: Arc::new(config),
            clock: Utc::now,
        }
    }
}

impl<C> SigningService<C>
where
    C: Fn() -> DateTime<Utc>,
{
    /// Create a signing service that timestamps requests with `clock`.
    pub fn with_clock(config: SignerConfig, clock: C) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    /// Retrieve the signer configuration.
    #[inline]
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }
}

impl<C> Debug for SigningService<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SigningService").field("config", &self.config).finish()
    }
}

impl<C> Service<ObjectRequest> for SigningService<C>
where
    C: Fn() -> DateTime<Utc>,
{
    type Response = SignedRequest;
    type Error = BoxError;
    type Future = Ready<Result<SignedRequest, BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), BoxError>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ObjectRequest) -> Self::Future {
        let now = (self.clock)();
        ready(self.config.sign(&req, now).map_err(BoxError::from))
    }
}
