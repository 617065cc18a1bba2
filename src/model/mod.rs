pub mod constant;
pub mod data_core;
pub mod explanation;
pub mod view;
