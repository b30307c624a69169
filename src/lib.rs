pub mod config;
pub mod generator;
pub mod items;
pub mod models;
pub mod parsers;
pub mod report;
pub mod storage;
