use crate::error::AppError;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::endpoints;
use super::models::*;

const REQUESTS_PER_SECOND: u32 = 5;
const MAX_RETRIES: u32 = 3;
const USER_AGENT: &str = "scrim_stats/0.1.0";

pub struct DataDragonClient {
    locale: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl DataDragonClient {
    pub fn new(locale: &str) -> Self {
        let quota = NonZeroU32::new(REQUESTS_PER_SECOND)
            .map(Quota::per_second)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN));
        DataDragonClient {
            locale: locale.to_string(),
            rate_limiter: RateLimiter::direct(quota),
            clock: DefaultClock::default(),
        }
    }

    fn wait_for_permit(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_permit();
            debug!(url, "requesting");

            let response = ureq::get(url)
                .set("User-Agent", USER_AGENT)
                .timeout(Duration::from_secs(10))
                .call();

            match response {
                Ok(resp) => {
                    return resp.into_json::<T>().map_err(|e| {
                        AppError::JsonError(format!("{}: {}", url, e))
                    });
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    warn!(wait_ms, "rate limited by Data Dragon, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    /// Newest patch version published on Data Dragon.
    pub fn latest_version(&self) -> Result<String, AppError> {
        let versions: Vec<String> = self.execute_request(&endpoints::versions_url())?;
        versions
            .into_iter()
            .next()
            .ok_or_else(|| AppError::JsonError("Data Dragon returned no versions".to_string()))
    }

    pub fn get_champions(&self, version: &str) -> Result<DataDragonChampions, AppError> {
        self.execute_request(&endpoints::champions_url(version, &self.locale))
    }

    /// Champion catalog for the latest patch, plus that patch's version tag.
    #[instrument(skip(self))]
    pub fn fetch_catalog(&self) -> Result<(Vec<ChampionCatalogEntry>, String), AppError> {
        let version = self.latest_version()?;
        let catalog = self.get_champions(&version)?.into_catalog();
        debug!(version = %version, champions = catalog.len(), "fetched champion catalog");
        Ok((catalog, version))
    }
}
