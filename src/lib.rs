pub mod config_loader;
pub mod console;
pub mod domain;
pub mod infrastructure;

pub use domain::constants::*;
pub use domain::enums::*;
pub use domain::model::exchange::*;
pub use domain::model::order::*;
pub use domain::model::order_book::*;
pub use domain::model::position::*;
pub use domain::pricing::*;
pub use infrastructure::exchange::deribit::*;
