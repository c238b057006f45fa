//! Rate-limited connector wrapper.
//!
//! Two counters per wrapped instance: a calendar-day counter that resets at
//! the next local midnight, and a minute counter that resets once a full
//! minute has passed since the previous attempt. An attempt over either
//! budget is rejected locally and never reaches the inner connector.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use hearth_core::{Middleware, ResourceConnector};
use hearth_types::{
    ExternalQuery, ExternalService, HearthError, RateLimitConfig, RateLimitState, RateLimitWindow,
};

fn next_local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_timezone(&Local)
        .date_naive()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map_or_else(|| now + Duration::hours(24), |t| t.with_timezone(&Utc))
}

/// Day and minute request counters for one connector instance.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    state: Mutex<RateLimitState>,
}

impl RateLimiter {
    /// Fresh counters under the given budget.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self::new_at(config, Utc::now())
    }

    /// Fresh counters as of `now`.
    #[must_use]
    pub fn new_at(config: RateLimitConfig, now: DateTime<Utc>) -> Self {
        Self {
            config,
            state: Mutex::new(RateLimitState {
                requests_today: 0,
                requests_this_minute: 0,
                day_resets_at: next_local_midnight(now),
                last_request_at: None,
            }),
        }
    }

    /// The configured budget.
    #[must_use]
    pub const fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Snapshot of the counters.
    #[must_use]
    pub fn state(&self) -> RateLimitState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Admit and count one attempt for `connector` at the current instant.
    ///
    /// # Errors
    /// Returns `HearthError::RateLimitExceeded` when either budget is spent.
    pub fn check_and_record(&self, connector: &str) -> Result<(), HearthError> {
        self.check_and_record_at(connector, Utc::now())
    }

    /// Admit and count one attempt at `now`.
    ///
    /// Every call refreshes the last-attempt instant, including rejected ones.
    ///
    /// # Errors
    /// Returns `HearthError::RateLimitExceeded` when either budget is spent.
    pub fn check_and_record_at(
        &self,
        connector: &str,
        now: DateTime<Utc>,
    ) -> Result<(), HearthError> {
        let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if now >= st.day_resets_at {
            st.requests_today = 0;
            st.day_resets_at = next_local_midnight(now);
        }
        if st
            .last_request_at
            .is_some_and(|last| now - last >= Duration::seconds(60))
        {
            st.requests_this_minute = 0;
        }
        st.last_request_at = Some(now);

        let exceeded = if st.requests_today >= self.config.requests_per_day {
            Some((self.config.requests_per_day, RateLimitWindow::Day))
        } else if st.requests_this_minute >= self.config.requests_per_minute {
            Some((self.config.requests_per_minute, RateLimitWindow::Minute))
        } else {
            None
        };

        if let Some((limit, window)) = exceeded {
            drop(st);
            tracing::warn!(connector, limit, %window, "rate limit exceeded");
            return Err(HearthError::RateLimitExceeded {
                connector: connector.to_string(),
                limit,
                window,
            });
        }

        st.requests_today += 1;
        st.requests_this_minute += 1;
        Ok(())
    }
}

/// Wrapper that enforces a [`RateLimiter`] in front of an inner connector.
pub struct RateLimitedConnector {
    inner: Arc<dyn ResourceConnector>,
    limiter: RateLimiter,
}

impl RateLimitedConnector {
    /// Create a new rate-limited wrapper around an existing connector.
    #[must_use]
    pub fn new(inner: Arc<dyn ResourceConnector>, config: RateLimitConfig) -> Self {
        Self {
            inner,
            limiter: RateLimiter::new(config),
        }
    }

    /// Access the inner connector.
    #[must_use]
    pub const fn inner(&self) -> &Arc<dyn ResourceConnector> {
        &self.inner
    }

    /// Access the limiter.
    #[must_use]
    pub const fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}

#[async_trait]
impl ResourceConnector for RateLimitedConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn label(&self) -> &'static str {
        self.inner.label()
    }

    async fn fetch_records(
        &self,
        query: &ExternalQuery,
    ) -> Result<Vec<ExternalService>, HearthError> {
        self.limiter.check_and_record(self.inner.name())?;
        self.inner.fetch_records(query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<ExternalService>, HearthError> {
        self.limiter.check_and_record(self.inner.name())?;
        self.inner.fetch_by_id(id).await
    }

    fn rate_limit_status(&self) -> Option<RateLimitState> {
        Some(self.limiter.state())
    }
}

/// Middleware config for constructing a [`RateLimitedConnector`].
pub struct RateLimitMiddleware {
    /// Budget applied to the wrapped connector.
    pub config: RateLimitConfig,
}

impl RateLimitMiddleware {
    /// Middleware applying `config`.
    #[must_use]
    pub const fn new(config: RateLimitConfig) -> Self {
        Self { config }
    }
}

impl Middleware for RateLimitMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn ResourceConnector>) -> Arc<dyn ResourceConnector> {
        Arc::new(RateLimitedConnector::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "RateLimitedConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests_per_day": self.config.requests_per_day,
            "requests_per_minute": self.config.requests_per_minute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 15, 0, 0).unwrap()
    }

    #[test]
    fn minute_budget_blocks_then_resets_after_idle_minute() {
        let rl = RateLimiter::new_at(RateLimitConfig::new(1000, 2), t0());
        assert!(rl.check_and_record_at("nyc311", t0()).is_ok());
        assert!(rl.check_and_record_at("nyc311", t0() + Duration::seconds(1)).is_ok());
        let err = rl
            .check_and_record_at("nyc311", t0() + Duration::seconds(2))
            .unwrap_err();
        assert!(matches!(
            err,
            HearthError::RateLimitExceeded {
                window: RateLimitWindow::Minute,
                limit: 2,
                ..
            }
        ));
        assert!(rl.check_and_record_at("nyc311", t0() + Duration::seconds(62)).is_ok());
        assert_eq!(rl.state().requests_today, 3);
    }

    #[test]
    fn day_budget_blocks_until_midnight() {
        let rl = RateLimiter::new_at(RateLimitConfig::new(2, 100), t0());
        assert!(rl.check_and_record_at("nyc311", t0()).is_ok());
        assert!(rl.check_and_record_at("nyc311", t0() + Duration::minutes(5)).is_ok());
        let err = rl
            .check_and_record_at("nyc311", t0() + Duration::minutes(10))
            .unwrap_err();
        assert!(matches!(
            err,
            HearthError::RateLimitExceeded {
                window: RateLimitWindow::Day,
                ..
            }
        ));

        let after_reset = rl.state().day_resets_at + Duration::seconds(1);
        assert!(rl.check_and_record_at("nyc311", after_reset).is_ok());
        assert_eq!(rl.state().requests_today, 1);
    }

    #[test]
    fn reset_instant_is_in_the_future() {
        let rl = RateLimiter::new_at(RateLimitConfig::default(), t0());
        let resets = rl.state().day_resets_at;
        assert!(resets > t0());
        assert!(resets <= t0() + Duration::hours(25));
    }
}
