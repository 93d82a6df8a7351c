pub mod admin;
pub mod approve;
pub mod claim;
pub mod deposit;
pub mod initialize;
pub mod masscall;
pub mod pool_admin;
pub mod swap;
pub mod test_helpers;
pub mod views;
pub mod withdraw;

pub use admin::*;
pub use approve::*;
pub use claim::*;
pub use deposit::*;
pub use initialize::*;
pub use masscall::*;
pub use pool_admin::*;
pub use swap::*;
pub use test_helpers::*;
pub use views::*;
pub use withdraw::*;
