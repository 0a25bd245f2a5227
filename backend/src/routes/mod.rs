pub mod chart;
pub mod export;
pub mod options;
pub mod selection;
