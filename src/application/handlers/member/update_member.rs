//! UpdateMemberHandler - Command handler for partial member updates.

use tracing::{debug, info};

use crate::application::GymContext;
use crate::domain::foundation::MemberId;
use crate::domain::member::{Member, MemberError, MemberPatch};
use crate::domain::notification::Notification;

/// Command to apply a partial update.
#[derive(Debug, Clone)]
pub struct UpdateMemberCommand {
    pub member_id: MemberId,
    pub patch: MemberPatch,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateMemberResult {
    pub member: Member,
    /// Set when the patch moved the expiry into the renewal window.
    pub renewal_notification: Option<Notification>,
}

/// Handler for member updates.
///
/// A patch that sets the membership expiry re-runs the renewal check for
/// that member before the lock is released.
pub struct UpdateMemberHandler {
    context: GymContext,
}

impl UpdateMemberHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: UpdateMemberCommand) -> Result<UpdateMemberResult, MemberError> {
        let now = self.context.now();
        let touches_expiry = cmd.patch.touches_expiry();
        let mut state = self.context.state.lock().await;
        let state = &mut *state;
        let before = state.clone();

        let member = state.registry.update(cmd.member_id, cmd.patch, now)?;

        let renewal_notification = if touches_expiry {
            debug!(member_id = %member.id, "Expiry changed, running renewal check");
            self.context
                .scheduler
                .check_member(&member, &mut state.notifications, now)
        } else {
            None
        };

        self.context.commit(state, before).await?;

        info!(member_id = %member.id, "Member updated");
        Ok(UpdateMemberResult {
            member,
            renewal_notification,
        })
    }
}
