mod consumer_runner;
mod decode_frames;
mod reverse_lookup_cache;

pub use consumer_runner::{spawn_consumer, ConsumerTask};
pub use decode_frames::{DecodeFramesUseCase, DecoderReport};
pub use reverse_lookup_cache::ReverseLookupCache;
