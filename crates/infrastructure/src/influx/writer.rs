use std::time::Duration;
use tapguard_domain::config::InfluxConfig;
use tapguard_domain::DomainError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub written: u64,
    pub dropped: u64,
    pub batches: u64,
}

/// Posts line-protocol batches to `/api/v2/write`.
#[derive(Clone)]
pub struct InfluxWriter {
    client: reqwest::Client,
    write_url: String,
    token: String,
    org: String,
    bucket: String,
}

impl InfluxWriter {
    pub fn new(config: &InfluxConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent("tapguard/0.3 (influx-writer)")
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DomainError::MetricsWrite(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            write_url: format!("{}/api/v2/write", config.url.trim_end_matches('/')),
            token: config.token.clone(),
            org: config.org.clone(),
            bucket: config.bucket.clone(),
        })
    }

    pub async fn write(&self, lines: &[String]) -> Result<(), DomainError> {
        let body = lines.join("\n");
        let response = self
            .client
            .post(&self.write_url)
            .query(&[
                ("org", self.org.as_str()),
                ("bucket", self.bucket.as_str()),
                ("precision", "ms"),
            ])
            .header("Authorization", format!("Token {}", self.token))
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::MetricsWrite(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DomainError::MetricsWrite(format!(
                "InfluxDB returned {}: {}",
                status,
                detail.trim()
            )));
        }
        Ok(())
    }

    /// Batch lines from `rx` and write them every `batch_size` lines or
    /// `flush_interval`, whichever comes first. Remaining lines are flushed
    /// once the channel closes.
    pub fn spawn(
        self,
        mut rx: mpsc::Receiver<String>,
        batch_size: usize,
        flush_interval: Duration,
    ) -> JoinHandle<WriterStats> {
        let batch_size = batch_size.max(1);
        tokio::spawn(async move {
            let mut stats = WriterStats::default();
            let mut batch = Vec::with_capacity(batch_size);
            let period = flush_interval.max(Duration::from_millis(1));
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    line = rx.recv() => match line {
                        Some(line) => {
                            batch.push(line);
                            if batch.len() >= batch_size {
                                self.flush(&mut batch, &mut stats).await;
                            }
                        }
                        None => break,
                    },
                    _ = ticker.tick() => {
                        if !batch.is_empty() {
                            self.flush(&mut batch, &mut stats).await;
                        }
                    }
                }
            }

            if !batch.is_empty() {
                self.flush(&mut batch, &mut stats).await;
            }
            info!(
                written = stats.written,
                dropped = stats.dropped,
                batches = stats.batches,
                "Influx writer finished"
            );
            stats
        })
    }

    async fn flush(&self, batch: &mut Vec<String>, stats: &mut WriterStats) {
        let lines = std::mem::take(batch);
        let count = lines.len() as u64;
        stats.batches += 1;
        match self.write(&lines).await {
            Ok(()) => {
                stats.written += count;
                debug!(points = count, "Influx batch written");
            }
            Err(e) => {
                stats.dropped += count;
                error!(points = count, error = %e, "write error");
            }
        }
    }
}
