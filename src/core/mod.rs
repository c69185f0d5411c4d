pub mod batch;
pub mod builders;
pub mod classifier;
pub mod etl;
pub mod fields;
pub mod pipeline;
pub mod processor;

pub use crate::domain::model::{BatchOutcome, EmployeeRecord};
pub use crate::domain::ports::{ConfigProvider, ManagerLookup, Pipeline, Storage};
pub use crate::utils::error::Result;
