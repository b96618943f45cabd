mod consumers;
mod decoder;

use tapguard_application::use_cases::{ConsumerTask, DecodeFramesUseCase};
use tapguard_domain::Config;
use tapguard_infrastructure::framestream::FrameSource;
use tracing::{info, warn};

/// Everything the supervisor runs, wired but not yet started (consumer
/// tasks excepted: they idle on their channels).
///
/// The decoder owns every consumer sender; `consumers` only carries the
/// task handles.
pub struct Pipeline {
    pub source: FrameSource,
    pub frame_buffer: usize,
    pub decoder: DecodeFramesUseCase,
    pub consumers: Vec<ConsumerTask>,
}

impl Pipeline {
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let source = FrameSource::open(&config.input).await?;
        info!(path = %config.input.path, kind = ?config.input.kind, "Frame source opened");

        let enabled = consumers::build(config).await?;
        if enabled.is_empty() {
            warn!("No consumers enabled; frames will be decoded and discarded");
        }

        let mut decoder = decoder::build(config)?;
        let mut tasks = Vec::with_capacity(enabled.len());
        for consumer in enabled {
            let (registered, task) =
                decoder.spawn_consumer(consumer, config.decoder.consumer_buffer_size);
            decoder = registered;
            tasks.push(task);
        }

        Ok(Self {
            source,
            frame_buffer: config.input.buffer_size,
            decoder,
            consumers: tasks,
        })
    }
}
