pub mod debounce;
pub mod providers;
pub mod search_controller;
pub mod view;

pub use search_controller::SearchController;
pub use view::WidgetSnapshot;
