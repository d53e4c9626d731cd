pub mod help_bar;
pub mod query_input;
pub mod result_view;
pub mod search_view;
pub mod suggestion_list;

pub use skycast_core::Component;

pub use help_bar::{HelpBar, HelpBarProps};
pub use query_input::{QueryInput, QueryInputProps};
pub use result_view::{ResultView, ResultViewProps};
pub use search_view::{SearchView, SearchViewProps};
pub use suggestion_list::{SuggestionList, SuggestionListProps};
