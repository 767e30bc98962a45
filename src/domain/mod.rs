pub mod constants;
pub mod enums;
pub mod model;
pub mod pricing;
