pub mod history;
pub mod pool;
pub mod protocol;
pub mod user_info;

pub use history::*;
pub use pool::*;
pub use protocol::*;
pub use user_info::*;
