//! Run lifecycle: phases, transitions, host signals, and snapshots.
//!
//! ## Key Types
//!
//! - `Run`: the state machine driving one playthrough
//! - `PlayerAction` / `HostSignal`: input in, pacing hints out
//! - `RunSnapshot`: serializable read-only view for renderers
//! - `RunEvent`: entries of the run history log

pub mod phase;
pub mod action;
pub mod history;
pub mod state;
pub mod snapshot;

pub use phase::{Phase, RunOutcome};
pub use action::{HostSignal, PlayerAction};
pub use history::RunEvent;
pub use state::{route_after_combat, CombatRoute, Run, RunState};
pub use snapshot::{CombatView, RewardView, RunSnapshot};
