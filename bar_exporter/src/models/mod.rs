pub mod bar;
pub mod job;
pub mod timeframe;
