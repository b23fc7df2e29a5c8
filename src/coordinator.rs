//! Refresh coordination and published weather state
//!
//! The coordinator owns the single `WeatherState` consumers read. Each cycle
//! computes one reference time, fetches the hourly and daily datasets
//! concurrently, rebuilds the halves that fetched successfully, and commits
//! them under one write lock. A failed half logs its cause and keeps the
//! previous cycle's data; nothing here ever propagates an error to the
//! scheduler.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use tokio::sync::{mpsc, Mutex, RwLock};

use crate::data::{
    build_daily_forecast, build_hourly_forecast, extract_hourly, reference_timestamp,
    ForecastSource, HourlySeries, SeriesError, WeatherRecord, WeatherState,
};

/// What a refresh cycle managed to update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Current conditions and hourly forecast were replaced
    pub hourly_updated: bool,
    /// Daily forecast was replaced
    pub daily_updated: bool,
}

/// Coordinates periodic refreshes and owns the published state
///
/// Construct once at startup and share by `Arc`; consumers read snapshots
/// through the accessor methods. A refresh gate serializes cycles so no two
/// run concurrently, and each half of the state is committed independently.
pub struct WeatherCoordinator<S> {
    source: S,
    state: RwLock<WeatherState>,
    refresh_gate: Mutex<()>,
}

impl<S: ForecastSource> WeatherCoordinator<S> {
    /// Creates a coordinator with empty published state
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(WeatherState::default()),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Runs one refresh cycle against the current wall clock
    pub async fn refresh(&self) -> RefreshOutcome {
        self.refresh_at(Utc::now()).await
    }

    /// Runs one refresh cycle using `now` as the shared reference time
    ///
    /// Both the hourly and daily builds align against this single timestamp.
    /// Never fails: fetch and payload problems degrade that half of the
    /// cycle and are logged.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> RefreshOutcome {
        let _gate = self.refresh_gate.lock().await;
        let reference = reference_timestamp(now);
        info!("starting refresh cycle, reference time {}", reference);

        let (hourly, daily) = futures::join!(self.source.fetch_hourly(), self.source.fetch_daily());

        let hourly_half = match hourly {
            Ok(series) => match build_hourly_half(&series, now, &reference) {
                Ok(half) => Some(half),
                Err(e) => {
                    error!("hourly payload unusable: {}", e);
                    None
                }
            },
            Err(e) => {
                error!("hourly fetch failed: {}", e);
                None
            }
        };

        let daily_half = match daily {
            Ok(series) => match build_daily_forecast(&series, now) {
                Ok(forecast) => Some(forecast),
                Err(e) => {
                    error!("daily payload unusable: {}", e);
                    None
                }
            },
            Err(e) => {
                error!("daily fetch failed: {}", e);
                None
            }
        };

        let outcome = RefreshOutcome {
            hourly_updated: hourly_half.is_some(),
            daily_updated: daily_half.is_some(),
        };

        // Single write-lock commit; readers never observe a half-applied cycle
        {
            let mut state = self.state.write().await;
            if let Some((current, forecast)) = hourly_half {
                if current.is_none() {
                    warn!("no hourly series entry aligned with {}", reference);
                }
                state.current_weather = current;
                state.hourly_forecast = forecast;
            }
            if let Some(forecast) = daily_half {
                state.daily_forecast = forecast;
            }
        }

        info!(
            "refresh cycle done (hourly updated: {}, daily updated: {})",
            outcome.hourly_updated, outcome.daily_updated
        );
        outcome
    }

    /// Returns the current conditions record, if one is published
    pub async fn current_weather(&self) -> Option<WeatherRecord> {
        self.state.read().await.current_weather.clone()
    }

    /// Returns the published hourly forecast
    pub async fn hourly_forecast(&self) -> Vec<Option<WeatherRecord>> {
        self.state.read().await.hourly_forecast.clone()
    }

    /// Returns the published daily forecast
    pub async fn daily_forecast(&self) -> Vec<Option<WeatherRecord>> {
        self.state.read().await.daily_forecast.clone()
    }

    /// Returns a snapshot of the whole published state
    pub async fn state_snapshot(&self) -> WeatherState {
        self.state.read().await.clone()
    }
}

impl<S: ForecastSource + 'static> WeatherCoordinator<S> {
    /// Spawns the periodic refresh loop
    ///
    /// The first tick is skipped; the startup refresh is the caller's
    /// explicit `refresh()` call. Each subsequent tick runs a full cycle to
    /// completion before the next can fire.
    ///
    /// # Returns
    /// A handle whose `shutdown` stops the loop; in-flight fetches are
    /// abandoned without touching the published state.
    pub fn spawn_refresh_loop(self: &Arc<Self>, interval: Duration) -> RefreshLoopHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let coordinator = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Skip the first tick (immediate)
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        coordinator.refresh().await;
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        RefreshLoopHandle { shutdown_tx }
    }
}

/// Handle for stopping the background refresh loop
pub struct RefreshLoopHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshLoopHandle {
    /// Signals the refresh loop to stop
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Builds the current record plus hourly forecast from one payload
fn build_hourly_half(
    series: &HourlySeries,
    now: DateTime<Utc>,
    reference: &str,
) -> Result<(Option<WeatherRecord>, Vec<Option<WeatherRecord>>), SeriesError> {
    let current = extract_hourly(series, reference)?;
    let forecast = build_hourly_forecast(series, now)?;
    Ok((current, forecast))
}
