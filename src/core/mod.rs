pub mod course_card;
pub mod current_list;
pub mod engine;
pub mod memo;
pub mod pipeline;
pub mod selectors;
pub mod store;

pub use crate::domain::model::RootState;
pub use crate::domain::ports::{Clock, ConfigProvider, Pipeline, StateSource, Storage};
pub use crate::utils::error::Result;
