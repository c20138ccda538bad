pub mod check;
pub mod replay;
pub mod init;
pub mod fix;
pub mod config;

pub use check::handle_check;
pub use replay::handle_replay;
pub use init::handle_init;
pub use fix::handle_fix;
pub use config::handle_config;
