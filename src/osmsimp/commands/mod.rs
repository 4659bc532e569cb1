pub mod convert;
pub mod ls;
pub mod menu;
pub mod query;
pub mod simplify;
