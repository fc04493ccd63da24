pub mod rest;

pub use rest::{AppState, AskResponse, ReplyConfig, RestApi};
