pub mod hostname_resolver;
pub mod unbound_control;

pub use hostname_resolver::PtrHostnameResolver;
pub use unbound_control::UnboundControl;
