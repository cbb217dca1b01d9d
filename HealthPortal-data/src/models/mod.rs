// Storage models: one row type per table plus the insert and partial-update
// payloads the repositories accept.

pub mod cycle;
pub mod goal;
pub mod interaction;
pub mod lab_result;
pub mod reminder;
pub mod supplement;
pub mod user;

pub use cycle::{Cycle, CycleChanges, NewCycle, StageOutputs};
pub use goal::{Goal, GoalChanges, NewGoal};
pub use interaction::{Interaction, InteractionChanges, NewInteraction};
pub use lab_result::{LabResult, LabResultChanges, NewLabResult};
pub use reminder::{NewReminder, Reminder, ReminderChanges};
pub use supplement::{NewSupplement, Supplement, SupplementChanges, SupplementFilter};
pub use user::{User, UserChanges};
