pub mod message;
pub mod player_state;
pub mod scene;
