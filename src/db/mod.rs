pub mod errors;
pub mod player_queries;
pub mod pelada_queries;
pub mod participation_queries;
pub mod match_queries;
pub mod goal_queries;
