//! Data models for the club's two source collections.
//!
//! - `Member`, `Gender`: the member directory
//! - `ScoreRecord`: one member's stroke count at one meeting
//!
//! Everything the engine derives from these lives in `crate::engine`.

pub mod member;
pub mod score;

pub use member::{Gender, Member};
pub use score::ScoreRecord;
