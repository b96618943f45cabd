pub mod health;
pub mod reload;

pub use health::health_check;
pub use reload::{update_all, update_black, update_block, update_white};
