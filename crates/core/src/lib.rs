#![forbid(unsafe_code)]

pub mod categories;
pub mod model;
pub mod pager;
pub mod quiz;
pub mod search;

pub use categories::{CategoryMap, format_categories};
pub use pager::{PAGE_SIZE, Page, PageNumber, paginate};
pub use quiz::{CategoryFilter, Picker, SeededPicker, ThreadRngPicker, select_next};
pub use search::search;
