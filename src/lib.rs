pub mod config;
pub mod models;
pub mod storage;
pub mod store;
pub mod views;
pub mod logging;
pub mod utils;
pub mod cli;
pub mod tui;

pub use config::Config;
pub use models::{DEFAULT_LIST_ID, List, Priority, Task};
pub use storage::Storage;
pub use store::Store;
pub use utils::Profile;
