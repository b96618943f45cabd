pub mod message_builder;
pub mod message_parser;
pub mod record_type_map;

pub use message_builder::MessageBuilder;
pub use message_parser::HickoryMessageParser;
pub use record_type_map::RecordTypeMapper;
