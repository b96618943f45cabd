use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tapguard_application::use_cases::{DecodeFramesUseCase, ReverseLookupCache};
use tapguard_domain::Config;
use tapguard_infrastructure::dns::HickoryMessageParser;
use tapguard_infrastructure::dnstap::DnstapCodec;
use tapguard_infrastructure::system::PtrHostnameResolver;

pub fn build(config: &Config) -> anyhow::Result<DecodeFramesUseCase> {
    let resolver: SocketAddr = config
        .decoder
        .resolver
        .parse()
        .with_context(|| format!("invalid decoder.resolver '{}'", config.decoder.resolver))?;

    let hostname_resolver = Arc::new(PtrHostnameResolver::new(
        resolver,
        Duration::from_millis(config.decoder.lookup_timeout_ms),
    ));
    let cache = ReverseLookupCache::new(
        hostname_resolver,
        Duration::from_secs(config.decoder.host_ttl_secs),
    );

    Ok(DecodeFramesUseCase::new(
        Arc::new(DnstapCodec::new()),
        Arc::new(HickoryMessageParser::new()),
        cache,
    ))
}
