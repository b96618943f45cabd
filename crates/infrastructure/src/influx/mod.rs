//! InfluxDB v2 metrics consumer.

mod consumer;
mod line_protocol;
mod writer;

pub use consumer::InfluxMetricsConsumer;
pub use line_protocol::{point_from_record, FieldValue, Point};
pub use writer::{InfluxWriter, WriterStats};
