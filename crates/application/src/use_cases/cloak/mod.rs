mod actuator_client;
mod command;
mod consumer;
mod engine;
mod reload;

pub use actuator_client::{ActuatorClient, ActuatorStats};
pub use command::Command;
pub use consumer::CloakDefenseConsumer;
pub use engine::{CloakEngine, EngineReport, EngineState};
pub use reload::{ReloadBlockListsUseCase, ReloadKind};
