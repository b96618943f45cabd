mod block_list_source;
mod dns_message_parser;
mod dnstap_decoder;
mod hostname_resolver;
mod record_consumer;
mod resolver_control;
mod trigger_listener;

pub use block_list_source::BlockListSource;
pub use dns_message_parser::DnsMessageParser;
pub use dnstap_decoder::DnstapDecoder;
pub use hostname_resolver::HostnameResolver;
pub use record_consumer::RecordConsumer;
pub use resolver_control::ResolverControl;
pub use trigger_listener::TriggerListener;
