pub mod dto;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use errors::ApiError;
pub use routes::create_reload_routes;
pub use server::ReloadServer;
pub use state::AppState;
