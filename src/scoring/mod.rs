pub mod engine;
pub mod policy;
pub mod set;
pub mod validation;

pub use engine::{classify_set, classify_sets, is_split, resolve_match, slots_to_show, MatchState};
pub use policy::{TiebreakPolicy, TiebreakRule, MAX_SETS, SETS_TO_WIN};
pub use set::{Set, SetOutcome, Side};
pub use validation::{check_games_range, validate_policy, validate_set, InvalidSetScore};
