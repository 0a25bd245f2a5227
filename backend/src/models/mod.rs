pub mod dataset;
pub mod fact;
pub mod year;

pub use dataset::{Dataset, DatasetView};
pub use fact::{Dimension, FactRow};
pub use year::{YearChoice, SELECT_ALL};
