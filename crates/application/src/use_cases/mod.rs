pub mod cloak;
pub mod decoder;

pub use cloak::{
    ActuatorClient, ActuatorStats, CloakDefenseConsumer, CloakEngine, Command, EngineReport,
    EngineState, ReloadBlockListsUseCase, ReloadKind,
};
pub use decoder::{
    spawn_consumer, ConsumerTask, DecodeFramesUseCase, DecoderReport, ReverseLookupCache,
};
