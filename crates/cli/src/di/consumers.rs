use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tapguard_api::{AppState, ReloadServer};
use tapguard_application::ports::RecordConsumer;
use tapguard_application::use_cases::CloakDefenseConsumer;
use tapguard_domain::config::CloakConfig;
use tapguard_domain::Config;
use tapguard_infrastructure::influx::InfluxMetricsConsumer;
use tapguard_infrastructure::lists::FileBlockListSource;
use tapguard_infrastructure::system::UnboundControl;
use tracing::info;

/// Enabled consumers, started but not yet attached to the decoder.
pub async fn build(config: &Config) -> anyhow::Result<Vec<Box<dyn RecordConsumer>>> {
    let mut consumers: Vec<Box<dyn RecordConsumer>> = Vec::new();

    if config.influx.enabled {
        let influx = InfluxMetricsConsumer::start(&config.influx)?;
        info!(
            url = %config.influx.url,
            bucket = %config.influx.bucket,
            measurement = %config.influx.measurement,
            "InfluxDB consumer enabled"
        );
        consumers.push(Box::new(influx));
    }

    if config.cloak.enabled {
        let cloak = build_cloak(&config.cloak).await?;
        consumers.push(Box::new(cloak));
    }

    Ok(consumers)
}

async fn build_cloak(config: &CloakConfig) -> anyhow::Result<CloakDefenseConsumer> {
    let source = Arc::new(FileBlockListSource::from_config(config));
    let control = Arc::new(UnboundControl::from_config(config));

    let consumer = CloakDefenseConsumer::start(source, control, config.buffer_size)
        .await
        .context("cannot start cloak defense without an initial block list")?;

    let bind = format!("{}:{}", config.bind_address, config.port);
    let bind_addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid reload listener address '{}'", bind))?;
    let server = ReloadServer::start(
        bind_addr,
        AppState {
            reload: consumer.reload_use_case(),
        },
    )
    .await?;

    info!(
        reload_url = %format!("http://{}", server.local_addr()),
        zone_type = %config.zone_type,
        "Cloak defense enabled"
    );
    Ok(consumer.with_listener(Box::new(server)))
}
