use crate::di::Pipeline;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Run the pipeline until the input ends or a shutdown signal arrives, then
/// wait for every stage to drain.
///
/// Shutdown only ever closes the frame source; the decoder and consumers
/// finish on their own once their input channels close.
pub async fn run_pipeline(pipeline: Pipeline) -> anyhow::Result<()> {
    let Pipeline {
        source,
        frame_buffer,
        decoder,
        consumers,
    } = pipeline;

    let cancel = CancellationToken::new();
    let (frames_tx, frames_rx) = mpsc::channel(frame_buffer.max(1));

    let mut source_task = source.spawn(frames_tx, cancel.clone());
    let mut decoder_task = tokio::spawn(decoder.run(frames_rx));

    let signal_cancel = cancel.clone();
    let signals = tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => info!("Shutdown signal received; draining"),
                    Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
                }
                signal_cancel.cancel();
            }
            _ = signal_cancel.cancelled() => {}
        }
    });

    let mut source_done = false;
    let decoded = tokio::select! {
        frames = &mut source_task => {
            source_done = true;
            log_source(frames);
            (&mut decoder_task).await
        }
        decoded = &mut decoder_task => decoded,
    };

    // The decoder can stop before the source on a framing error.
    cancel.cancel();
    if !source_done {
        log_source(source_task.await);
    }
    log_signal_listener(signals.await);

    let decoder_result = match decoded {
        Ok(Ok(report)) => {
            info!(
                frames = report.frames,
                records = report.records,
                skipped = report.skipped,
                "Decoder report"
            );
            Ok(())
        }
        Ok(Err(e)) => Err(anyhow::anyhow!(e).context("decoder stopped on an unrecoverable frame")),
        Err(e) => Err(anyhow::anyhow!(e).context("decoder task failed")),
    };

    // The decoder has dropped every sender by now; this only waits.
    for consumer in consumers {
        let name = consumer.name.clone();
        if let Err(e) = consumer.join().await {
            error!(consumer = %name, error = %e, "Consumer task failed");
        }
    }

    decoder_result
}

/// Logs a panicked or cancelled signal listener. Returns false in that case.
fn log_signal_listener(result: Result<(), JoinError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "Signal listener task failed");
            false
        }
    }
}

fn log_source(result: Result<Result<u64, tapguard_domain::DomainError>, JoinError>) {
    match result {
        Ok(Ok(frames)) => info!(frames, "Frame source finished"),
        Ok(Err(e)) => warn!(error = %e, "Frame source stopped with an error"),
        Err(e) => error!(error = %e, "Frame source task failed"),
    }
}
