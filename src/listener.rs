//! Hooks that observe successful RMAPI response bodies.

use reqwest::Method;

/// What was asked and what came back, passed to every [`ResponseBodyListener`].
#[derive(Debug, Clone)]
pub struct InteractionContext {
    pub method: Method,
    pub uri: String,
    pub status: u16,
}

/// Receives each successful response body before it is decoded.
pub trait ResponseBodyListener: Send + Sync {
    fn body_received(&self, body: &[u8], context: &InteractionContext);
}

impl<F> ResponseBodyListener for F
where
    F: Fn(&[u8], &InteractionContext) + Send + Sync,
{
    fn body_received(&self, body: &[u8], context: &InteractionContext) {
        self(body, context)
    }
}

/// Logs successful interactions at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuccessBodyLogger;

impl ResponseBodyListener for SuccessBodyLogger {
    fn body_received(&self, _body: &[u8], context: &InteractionContext) {
        if matches!(context.status, 200 | 201 | 202 | 204) {
            tracing::debug!(
                query = %context.uri,
                status = context.status,
                "[OK] RMAPI Service response"
            );
        }
    }
}
