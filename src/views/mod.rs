pub mod player_form;
pub mod player_list;
pub mod match_view;
pub mod ticker;

pub use match_view::{MatchView, MatchViewState};
pub use player_form::{FormMode, PlayerForm, PlayerSubmission};
pub use player_list::{PlayerListState, PlayerListView};
pub use ticker::Ticker;
