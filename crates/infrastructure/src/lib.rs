//! Adapters behind the application ports: dnstap input, DNS parsing,
//! reverse lookups, the resolver actuator, list files and InfluxDB output.
pub mod dns;
pub mod dnstap;
pub mod framestream;
pub mod influx;
pub mod lists;
pub mod system;
