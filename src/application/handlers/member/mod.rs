//! Member handlers.

mod create_member;
mod delete_member;
mod member_activity;
mod queries;
mod update_member;

pub use create_member::{CreateMemberCommand, CreateMemberHandler, CreateMemberResult};
pub use delete_member::{DeleteMemberCommand, DeleteMemberHandler, DeleteMemberResult};
pub use member_activity::{
    ProgressPhotoCommand, ProgressPhotoHandler, RecordVisitCommand, RecordVisitHandler,
    WorkoutPlanCommand, WorkoutPlanHandler,
};
pub use queries::{GetMemberHandler, GetMemberQuery, ListMembersHandler, ListMembersQuery};
pub use update_member::{UpdateMemberCommand, UpdateMemberHandler, UpdateMemberResult};
