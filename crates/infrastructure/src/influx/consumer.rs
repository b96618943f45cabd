use super::{point_from_record, InfluxWriter};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tapguard_application::ports::RecordConsumer;
use tapguard_domain::config::InfluxConfig;
use tapguard_domain::{DomainError, TransactionRecord};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use super::WriterStats;

/// Turns each record into a point and hands it to the batching writer task.
pub struct InfluxMetricsConsumer {
    measurement: String,
    lines: mpsc::Sender<String>,
    writer: JoinHandle<WriterStats>,
}

impl InfluxMetricsConsumer {
    pub fn start(config: &InfluxConfig) -> Result<Self, DomainError> {
        let writer = InfluxWriter::new(config)?;
        Ok(Self::with_writer(config, writer))
    }

    pub fn with_writer(config: &InfluxConfig, writer: InfluxWriter) -> Self {
        let (lines, rx) = mpsc::channel(config.buffer_size.max(1));
        let writer = writer.spawn(
            rx,
            config.batch_size,
            Duration::from_millis(config.flush_interval_ms),
        );
        Self {
            measurement: config.measurement.clone(),
            lines,
            writer,
        }
    }
}

#[async_trait]
impl RecordConsumer for InfluxMetricsConsumer {
    fn name(&self) -> &str {
        "influx"
    }

    async fn consume(&mut self, record: Arc<TransactionRecord>) {
        let Some(point) = point_from_record(&self.measurement, &record) else {
            return;
        };
        if self.lines.send(point.to_line()).await.is_err() {
            warn!("Influx writer stopped; dropping point");
        }
    }

    async fn finish(self: Box<Self>) {
        let this = *self;
        drop(this.lines);
        if let Err(e) = this.writer.await {
            error!(error = %e, "Influx writer task failed");
        }
    }
}
