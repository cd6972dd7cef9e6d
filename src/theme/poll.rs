//! Waiting for a freshly created theme to become previewable.
//!
//! A theme created from a zip archive is processed asynchronously by the
//! server. [`ReadinessPoller`] re-reads the theme every
//! [`READINESS_POLL_INTERVAL`] until `previewable` is set.
//!
//! By default the poller waits indefinitely, as the server gives no upper
//! bound on processing time. [`ReadinessPoller::deadline`] opts into a
//! limit.

use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::theme::errors::ThemeError;
use crate::theme::resources::Theme;
use crate::theme::ThemeClient;

/// Delay between two readiness checks.
pub const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polls a theme until it is previewable.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use themekit::ReadinessPoller;
///
/// let client = client.for_theme("123456");
/// let theme = ReadinessPoller::new(&client)
///     .deadline(Duration::from_secs(120))
///     .wait()
///     .await?;
/// assert!(theme.previewable);
/// ```
#[derive(Debug)]
pub struct ReadinessPoller<'a> {
    client: &'a ThemeClient,
    interval: Duration,
    deadline: Option<Duration>,
}

impl<'a> ReadinessPoller<'a> {
    /// Creates a poller for the theme the client is bound to.
    #[must_use]
    pub const fn new(client: &'a ThemeClient) -> Self {
        Self {
            client,
            interval: READINESS_POLL_INTERVAL,
            deadline: None,
        }
    }

    /// Gives up with [`ThemeError::ReadinessTimeout`] once `limit` has
    /// elapsed.
    #[must_use]
    pub const fn deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(limit);
        self
    }

    /// Polls until the theme is previewable.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ThemeSetupIncomplete`] wrapping the first
    /// failed check, or [`ThemeError::ReadinessTimeout`] when a deadline is
    /// set and has elapsed.
    pub async fn wait(self) -> Result<Theme, ThemeError> {
        let started = Instant::now();

        loop {
            match self.client.get_info().await {
                Ok(theme) if theme.previewable => {
                    tracing::info!(
                        theme_id = self.client.theme_id(),
                        waited_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                        "theme is ready for preview"
                    );
                    return Ok(theme);
                }
                Ok(_) => {
                    tracing::debug!(theme_id = self.client.theme_id(), "processing...");
                }
                Err(error) => {
                    tracing::error!(
                        theme_id = self.client.theme_id(),
                        error = %error,
                        "encountered an error while checking new theme"
                    );
                    return Err(ThemeError::ThemeSetupIncomplete {
                        source: Box::new(error),
                    });
                }
            }

            if let Some(limit) = self.deadline {
                let waited = started.elapsed();
                if waited + self.interval > limit {
                    return Err(ThemeError::ReadinessTimeout { waited });
                }
            }

            sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clients::mock::MockTransport;
    use crate::config::{AccessToken, ShopDomain, ThemeConfig};

    const PROCESSING: &str = r#"{"theme":{"id":123,"name":"timberland","previewable":false}}"#;
    const READY: &str = r#"{"theme":{"id":123,"name":"timberland","previewable":true}}"#;

    fn client(transport: &MockTransport) -> ThemeClient {
        let config = ThemeConfig::builder()
            .domain(ShopDomain::new("test-shop").unwrap())
            .password(AccessToken::new("secret").unwrap())
            .theme_id("123")
            .build()
            .unwrap();
        ThemeClient::with_transport(&config, Arc::new(transport.clone())).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_returns_once_previewable() {
        let transport = MockTransport::new()
            .reply(200, PROCESSING)
            .reply(200, PROCESSING)
            .reply(200, READY);
        let client = client(&transport);

        let started = Instant::now();
        let theme = ReadinessPoller::new(&client).wait().await.unwrap();

        assert!(theme.previewable);
        assert_eq!(transport.calls().len(), 3);
        assert_eq!(started.elapsed(), READINESS_POLL_INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_theme_returns_without_sleeping() {
        let transport = MockTransport::new().reply(200, READY);
        let client = client(&transport);

        let started = Instant::now();
        ReadinessPoller::new(&client).wait().await.unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_check_reports_setup_incomplete() {
        let transport = MockTransport::new()
            .reply(200, PROCESSING)
            .reply(404, "");
        let client = client(&transport);

        let error = ReadinessPoller::new(&client).wait().await.unwrap_err();

        match error {
            ThemeError::ThemeSetupIncomplete { ref source } => {
                assert!(matches!(**source, ThemeError::ThemeNotFound));
            }
            ref other => panic!("expected setup incomplete, got {other:?}"),
        }
        assert!(error.to_string().contains("theme download"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_stops_polling() {
        let transport = MockTransport::new()
            .reply(200, PROCESSING)
            .reply(200, PROCESSING)
            .reply(200, PROCESSING);
        let client = client(&transport);

        let error = ReadinessPoller::new(&client)
            .deadline(Duration::from_millis(1200))
            .wait()
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ThemeError::ReadinessTimeout { waited } if waited == Duration::from_millis(1000)
        ));
        assert_eq!(transport.calls().len(), 3);
    }
}
