/*
[INPUT]:  Domain type definitions
[OUTPUT]: Task and TaskId shared by store, session and storage backends
[POS]:    Types module root
[UPDATE]: When the persisted task shape changes
*/

mod task;

pub use task::{Task, TaskId};
