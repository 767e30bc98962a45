pub mod exchange;
pub mod order;
pub mod order_book;
pub mod position;
