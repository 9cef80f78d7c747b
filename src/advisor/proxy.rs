//! The advisory proxy
//!
//! Answers place, route and maintenance queries from the remote generator
//! when it can and from the local fallback when it can't. Callers always get
//! a usable `Advisory`; remote failures are absorbed here.
//!
//! Shared state per proxy:
//! - one cooldown, set by quota failures and checked before every remote call
//! - a response cache per cached operation (places, routes)
//! - an in-flight registry per operation, so identical concurrent requests
//!   share a single remote call

use std::sync::Arc;
use std::time::Duration;

use super::cache::{ResponseCache, normalize_key};
use super::cooldown::Cooldown;
use super::fallback;
use super::parser;
use super::prompt;
use super::provider::{GenerateRequest, Generator, ModelTier, RemoteCallError};
use super::single_flight::{Role, SingleFlight};
use super::types::{Advisory, MaintenanceForecastItem, RoutePlan};
use crate::config::AdvisorConfig;
use crate::fleet::{MaintenanceRecord, Vehicle};

/// Shortest place query worth sending anywhere
pub const MIN_PLACE_QUERY_CHARS: usize = 3;

type Outcome<T> = Result<T, RemoteCallError>;

/// Proxy tuning
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorSettings {
    pub cooldown: Duration,
    pub timeout: Duration,
    pub cache_capacity: Option<usize>,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(60),
            timeout: Duration::from_secs(10),
            cache_capacity: None,
        }
    }
}

impl From<&AdvisorConfig> for AdvisorSettings {
    fn from(config: &AdvisorConfig) -> Self {
        Self {
            cooldown: config.cooldown(),
            timeout: config.timeout(),
            cache_capacity: config.cache_capacity,
        }
    }
}

/// Cache and in-flight registry for one operation
struct Lane<T> {
    cache: Option<Arc<ResponseCache<T>>>,
    flights: Arc<SingleFlight<Outcome<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Lane<T> {
    fn cached(capacity: Option<usize>) -> Self {
        Self {
            cache: Some(Arc::new(ResponseCache::new(capacity))),
            flights: Arc::new(SingleFlight::new()),
        }
    }

    fn uncached() -> Self {
        Self {
            cache: None,
            flights: Arc::new(SingleFlight::new()),
        }
    }

    fn lookup(&self, key: &str) -> Option<T> {
        self.cache.as_ref().and_then(|cache| cache.get(key))
    }
}

pub struct AdvisoryProxy<G> {
    generator: Arc<G>,
    timeout: Duration,
    cooldown: Arc<Cooldown>,
    places: Lane<Vec<String>>,
    routes: Lane<RoutePlan>,
    forecasts: Lane<Vec<MaintenanceForecastItem>>,
}

impl<G: Generator> AdvisoryProxy<G> {
    pub fn new(generator: G, settings: AdvisorSettings) -> Self {
        Self {
            generator: Arc::new(generator),
            timeout: settings.timeout,
            cooldown: Arc::new(Cooldown::new(settings.cooldown)),
            places: Lane::cached(settings.cache_capacity),
            routes: Lane::cached(settings.cache_capacity),
            forecasts: Lane::uncached(),
        }
    }

    /// Whether remote calls are currently being skipped
    pub fn is_throttled(&self) -> bool {
        self.cooldown.is_active()
    }

    pub fn cooldown_remaining(&self) -> Option<Duration> {
        self.cooldown.remaining()
    }

    /// Place-name autocomplete
    pub async fn suggest_places(&self, query: &str) -> Advisory<Vec<String>> {
        let key = normalize_key(&[query]);
        if key.chars().count() < MIN_PLACE_QUERY_CHARS {
            return Advisory::local(Vec::new(), self.is_throttled());
        }

        if let Some(places) = self.places.lookup(&key) {
            log::debug!("Place cache hit for {:?}", key);
            return Advisory::remote(places, self.is_throttled());
        }

        if self.cooldown.is_active() {
            log::debug!("Cooldown active, local places for {:?}", key);
            return Advisory::local(fallback::local_places(&key), true);
        }

        let request = GenerateRequest::text(prompt::places_prompt(query), ModelTier::Fast);
        match self
            .remote(&self.places, key.clone(), request, parser::parse_places)
            .await
        {
            Ok(places) => Advisory::remote(places, self.is_throttled()),
            Err(_) => Advisory::local(fallback::local_places(&key), self.is_throttled()),
        }
    }

    /// Route optimization between two places for a vehicle class
    pub async fn optimize_route(
        &self,
        origin: &str,
        destination: &str,
        vehicle_type: &str,
    ) -> Advisory<RoutePlan> {
        let key = normalize_key(&[origin, destination, vehicle_type]);

        if let Some(plan) = self.routes.lookup(&key) {
            log::debug!("Route cache hit for {:?}", key);
            return Advisory::remote(plan, self.is_throttled());
        }

        if self.cooldown.is_active() {
            log::debug!("Cooldown active, local route for {:?}", key);
            return Advisory::local(fallback::local_route(origin, destination), true);
        }

        let request = GenerateRequest::structured(
            prompt::route_prompt(origin, destination, vehicle_type),
            prompt::route_schema(),
            ModelTier::Fast,
        );
        match self
            .remote(&self.routes, key, request, parser::parse_route_plan)
            .await
        {
            Ok(plan) => Advisory::remote(plan, self.is_throttled()),
            Err(_) => Advisory::local(
                fallback::local_route(origin, destination),
                self.is_throttled(),
            ),
        }
    }

    /// Maintenance forecast for a vehicle given its service history
    ///
    /// Never cached: the history may have changed since the last call.
    pub async fn predict_maintenance(
        &self,
        vehicle: &Vehicle,
        history: &[MaintenanceRecord],
    ) -> Advisory<Vec<MaintenanceForecastItem>> {
        if self.cooldown.is_active() {
            log::debug!("Cooldown active, local forecast for {}", vehicle.id);
            return Advisory::local(fallback::local_forecast(), true);
        }

        let mileage = vehicle.mileage.to_string();
        let flattened = prompt::flatten_history(history);
        let key = normalize_key(&[
            vehicle.id.as_str(),
            vehicle.make.as_str(),
            vehicle.model.as_str(),
            mileage.as_str(),
            flattened.as_str(),
        ]);

        let request = GenerateRequest::structured(
            prompt::maintenance_prompt(vehicle, history),
            prompt::forecast_schema(),
            ModelTier::Deep,
        );
        match self
            .remote(&self.forecasts, key, request, parser::parse_forecast)
            .await
        {
            Ok(items) => Advisory::remote(items, self.is_throttled()),
            Err(_) => Advisory::local(fallback::local_forecast(), self.is_throttled()),
        }
    }

    /// Run (or join) the remote call for `key` on `lane`
    ///
    /// The call runs as a spawned task, so it completes (and is recorded)
    /// even if every caller stops waiting. The task records its own outcome:
    /// a success goes into the lane's cache and a quota failure trips the
    /// cooldown. That happens once per flight no matter how many callers are
    /// waiting.
    async fn remote<T, P>(
        &self,
        lane: &Lane<T>,
        key: String,
        request: GenerateRequest,
        parse: P,
    ) -> Outcome<T>
    where
        T: Clone + Send + Sync + 'static,
        P: FnOnce(&str) -> Outcome<T> + Send + 'static,
    {
        let generator = Arc::clone(&self.generator);
        let cooldown = Arc::clone(&self.cooldown);
        let cache = lane.cache.clone();
        let timeout = self.timeout;
        let record_key = key.clone();

        let (flight, role) = lane.flights.join_or_start(key, move || async move {
            let outcome = call_with_timeout(generator.as_ref(), &request, timeout)
                .await
                .and_then(|text| parse(&text));

            match &outcome {
                Ok(payload) => {
                    if let Some(cache) = cache {
                        cache.insert(record_key, payload.clone());
                    }
                }
                Err(e) if e.is_quota_exceeded() => {
                    cooldown.trip();
                    log::warn!(
                        "Quota exhausted, skipping remote calls for {}s: {}",
                        cooldown.window().as_secs(),
                        e
                    );
                }
                Err(e @ RemoteCallError::NotConfigured { .. }) => {
                    log::debug!("Remote advisory unavailable: {}", e);
                }
                Err(e) => {
                    log::warn!("Remote advisory failed, using local fallback: {}", e);
                }
            }
            outcome
        });

        if role == Role::Follower {
            log::debug!("Joined in-flight remote call");
        }
        match flight.await {
            Ok(outcome) => outcome,
            Err(aborted) => {
                log::warn!("{}, using local fallback", aborted);
                Err(RemoteCallError::Aborted {
                    message: aborted.0,
                })
            }
        }
    }
}

/// Run one generate call, bounded by `timeout`
async fn call_with_timeout<G: Generator>(
    generator: &G,
    request: &GenerateRequest,
    timeout: Duration,
) -> Outcome<String> {
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(RemoteCallError::Timeout {
            provider: generator.name().to_string(),
            after_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod proxy_tests;
