//! DeleteMemberHandler - Command handler for removing members.
//!
//! The member's notifications go with it. Subscriptions stay in the ledger,
//! still pointing at the removed member id.

use tracing::info;

use crate::application::GymContext;
use crate::domain::foundation::MemberId;
use crate::domain::member::{Member, MemberError};

/// Command to delete a member.
#[derive(Debug, Clone)]
pub struct DeleteMemberCommand {
    pub member_id: MemberId,
}

/// Result of a successful delete.
#[derive(Debug, Clone)]
pub struct DeleteMemberResult {
    pub member: Member,
    pub notifications_removed: usize,
    /// Subscriptions left referencing the deleted member.
    pub orphaned_subscriptions: usize,
}

pub struct DeleteMemberHandler {
    context: GymContext,
}

impl DeleteMemberHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: DeleteMemberCommand) -> Result<DeleteMemberResult, MemberError> {
        let mut state = self.context.state.lock().await;
        let state = &mut *state;
        let before = state.clone();

        let member = state.registry.delete(cmd.member_id)?;
        let notifications_removed = state.notifications.remove_for_member(member.id);
        let orphaned_subscriptions = state.subscriptions.list_for_member(member.id).len();

        self.context.commit(state, before).await?;

        info!(
            member_id = %member.id,
            notifications_removed,
            orphaned_subscriptions,
            "Member deleted"
        );
        Ok(DeleteMemberResult {
            member,
            notifications_removed,
            orphaned_subscriptions,
        })
    }
}
