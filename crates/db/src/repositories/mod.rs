//! Database repositories.

mod poll;

pub use poll::{NewPoll, PollRepository, PollUpdate};
