//! Traffic generator for the synthpulse demo service.
//!
//! Produces request patterns (steady, spike, error-heavy, slow) so the
//! exported metrics have visible shape. Requests run on a bounded worker
//! pool; pacing controls the offered rate.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::seq::IndexedRandom;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

const NORMAL_ENDPOINTS: [&str; 3] = ["/", "/api/users", "/health"];
const SPIKE_ENDPOINTS: [(&str, u32); 4] =
    [("/", 3), ("/api/users", 4), ("/api/load", 2), ("/health", 1)];

#[derive(Parser)]
#[command(name = "synthpulse-loadgen")]
#[command(about = "Traffic generator for the synthpulse demo service")]
struct Args {
    /// Base URL of the service
    #[arg(long, default_value = "http://localhost:8000")]
    url: String,

    /// Load pattern to generate
    #[arg(long, value_enum, default_value_t = Scenario::Demo)]
    scenario: Scenario,

    /// Duration in seconds for single-pattern scenarios
    #[arg(long, default_value_t = 120)]
    duration: u64,

    /// Requests per second for normal load
    #[arg(long, default_value_t = 3)]
    rps: u32,

    /// Maximum in-flight requests
    #[arg(long, default_value_t = 5)]
    workers: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    Normal,
    Spike,
    Errors,
    Slow,
    Demo,
}

struct LoadGenerator {
    client: reqwest::Client,
    base_url: String,
    limiter: Arc<Semaphore>,
}

impl LoadGenerator {
    fn new(base_url: String, workers: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url,
            limiter: Arc::new(Semaphore::new(workers.max(1))),
        })
    }

    /// Fire one request in the background, bounded by the worker pool.
    async fn submit(&self, endpoint: &str) {
        let Ok(permit) = Arc::clone(&self.limiter).acquire_owned().await else {
            return;
        };
        let client = self.client.clone();
        let url = format!("{}{}", self.base_url, endpoint);

        tokio::spawn(async move {
            let started = Instant::now();
            match client.get(&url).send().await {
                Ok(resp) => tracing::debug!(
                    %url,
                    status = resp.status().as_u16(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "request done"
                ),
                Err(e) => tracing::warn!(%url, error = %e, "request failed"),
            }
            drop(permit);
        });
    }

    async fn normal(&self, duration: Duration, rps: u32) {
        tracing::info!(duration_s = duration.as_secs(), rps, "generating normal load");

        let deadline = Instant::now() + duration;
        let pace = Duration::from_secs_f64(1.0 / rps.max(1) as f64);
        while Instant::now() < deadline {
            self.submit(pick_uniform(&NORMAL_ENDPOINTS)).await;
            tokio::time::sleep(pace).await;
        }
    }

    async fn spike(&self, duration: Duration, rps: u32) {
        tracing::info!(duration_s = duration.as_secs(), rps, "generating spike load");

        let deadline = Instant::now() + duration;
        let pace = Duration::from_secs_f64(1.0 / rps.max(1) as f64);
        while Instant::now() < deadline {
            self.submit(pick_weighted(&SPIKE_ENDPOINTS)).await;
            tokio::time::sleep(pace).await;
        }
    }

    /// Hammer the endpoint with a built-in failure rate.
    async fn errors(&self, duration: Duration) {
        tracing::info!(duration_s = duration.as_secs(), "generating error-prone load");

        let deadline = Instant::now() + duration;
        while Instant::now() < deadline {
            self.submit("/api/users").await;
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }

    /// Paced slowly so the long-running requests can complete.
    async fn slow(&self, duration: Duration) {
        tracing::info!(duration_s = duration.as_secs(), "generating slow request load");

        let deadline = Instant::now() + duration;
        while Instant::now() < deadline {
            self.submit("/api/load").await;
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
    }

    /// Full tour: normal, spike, recovery, errors, slow, normal again.
    async fn demo(&self) {
        tracing::info!("starting demo scenario");

        self.normal(Duration::from_secs(120), 3).await;
        self.pause().await;
        self.spike(Duration::from_secs(60), 15).await;
        self.pause().await;
        self.normal(Duration::from_secs(60), 2).await;
        self.pause().await;
        self.errors(Duration::from_secs(90)).await;
        self.pause().await;
        self.slow(Duration::from_secs(90)).await;
        self.pause().await;
        self.normal(Duration::from_secs(120), 3).await;

        tracing::info!("demo scenario completed");
    }

    async fn pause(&self) {
        tracing::info!("waiting 30 seconds before next phase");
        tokio::time::sleep(Duration::from_secs(30)).await;
    }
}

fn pick_uniform(options: &[&'static str]) -> &'static str {
    let mut rng = rand::rng();
    options.choose(&mut rng).copied().unwrap_or("/")
}

fn pick_weighted(options: &[(&'static str, u32)]) -> &'static str {
    let mut rng = rand::rng();
    options
        .choose_weighted(&mut rng, |o| o.1)
        .map(|o| o.0)
        .unwrap_or("/")
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let generator = LoadGenerator::new(args.url, args.workers)?;
    let duration = Duration::from_secs(args.duration);

    let run = async {
        match args.scenario {
            Scenario::Normal => generator.normal(duration, args.rps).await,
            Scenario::Spike => generator.spike(duration, args.rps * 3).await,
            Scenario::Errors => generator.errors(duration).await,
            Scenario::Slow => generator.slow(duration).await,
            Scenario::Demo => generator.demo().await,
        }
    };

    tokio::select! {
        _ = run => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("stopping load generator");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn args_default_to_the_demo_scenario() {
        let args = Args::try_parse_from(["synthpulse-loadgen"]).unwrap();
        assert_eq!(args.url, "http://localhost:8000");
        assert!(matches!(args.scenario, Scenario::Demo));
        assert_eq!(args.duration, 120);
        assert_eq!(args.rps, 3);
        assert_eq!(args.workers, 5);
    }

    #[test]
    fn args_parse_each_scenario_name() {
        let parse = |name: &str| {
            Args::try_parse_from(["synthpulse-loadgen", "--scenario", name])
                .unwrap()
                .scenario
        };
        assert!(matches!(parse("normal"), Scenario::Normal));
        assert!(matches!(parse("spike"), Scenario::Spike));
        assert!(matches!(parse("errors"), Scenario::Errors));
        assert!(matches!(parse("slow"), Scenario::Slow));
        assert!(matches!(parse("demo"), Scenario::Demo));
        assert!(Args::try_parse_from(["synthpulse-loadgen", "--scenario", "chaos"]).is_err());
    }

    #[test]
    fn args_apply_overrides() {
        let args = Args::try_parse_from([
            "synthpulse-loadgen",
            "--url",
            "http://10.0.0.1:9000",
            "--scenario",
            "spike",
            "--duration",
            "30",
            "--rps",
            "10",
            "--workers",
            "2",
        ])
        .unwrap();
        assert_eq!(args.url, "http://10.0.0.1:9000");
        assert!(matches!(args.scenario, Scenario::Spike));
        assert_eq!(args.duration, 30);
        assert_eq!(args.rps, 10);
        assert_eq!(args.workers, 2);
    }

    #[test]
    fn uniform_pick_stays_within_the_option_set() {
        for _ in 0..200 {
            let endpoint = pick_uniform(&NORMAL_ENDPOINTS);
            assert!(NORMAL_ENDPOINTS.contains(&endpoint));
        }
    }

    #[test]
    fn weighted_pick_reaches_every_endpoint() {
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let endpoint = pick_weighted(&SPIKE_ENDPOINTS);
            assert!(SPIKE_ENDPOINTS.iter().any(|o| o.0 == endpoint));
            seen.insert(endpoint);
        }
        assert_eq!(seen.len(), SPIKE_ENDPOINTS.len());
    }

    #[test]
    fn worker_pool_is_never_sized_zero() {
        let generator = LoadGenerator::new("http://localhost:8000".to_string(), 0).unwrap();
        assert_eq!(generator.limiter.available_permits(), 1);

        let generator = LoadGenerator::new("http://localhost:8000".to_string(), 5).unwrap();
        assert_eq!(generator.limiter.available_permits(), 5);
    }
}
