pub mod traits;
pub mod fetch;
pub mod labeling;
pub mod manager;

pub use fetch::{FetchSection, MAX_PAGE_SIZE};
pub use labeling::{LabelingMethod, LabelingSection};
pub use manager::{AppConfig, ConfigManager};
pub use traits::ConfigSection;
