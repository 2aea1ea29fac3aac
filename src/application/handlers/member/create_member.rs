//! CreateMemberHandler - Command handler for registering members.

use tracing::info;

use crate::application::GymContext;
use crate::domain::member::{Member, MemberError, MemberInput};
use crate::domain::notification::Notification;

/// Command to register a new member.
#[derive(Debug, Clone)]
pub struct CreateMemberCommand {
    pub input: MemberInput,
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct CreateMemberResult {
    pub member: Member,
    /// Renewal reminder, when the membership is already close to expiry.
    pub renewal_notification: Option<Notification>,
}

/// Handler for registering members.
pub struct CreateMemberHandler {
    context: GymContext,
}

impl CreateMemberHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: CreateMemberCommand) -> Result<CreateMemberResult, MemberError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let state = &mut *state;
        let before = state.clone();

        // 1. Register (validation + email uniqueness)
        let member = state.registry.create(cmd.input, now)?;

        // 2. Same renewal rule as the recurring check
        let renewal_notification =
            self.context
                .scheduler
                .check_member(&member, &mut state.notifications, now);

        // 3. Persist
        self.context.commit(state, before).await?;

        info!(
            member_id = %member.id,
            membership_expiry = %member.membership_expiry,
            "Member registered"
        );

        Ok(CreateMemberResult {
            member,
            renewal_notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::test_support::{date, flaky_gym, test_gym};
    use crate::domain::member::MemberStatus;

    #[tokio::test]
    async fn registers_with_default_expiry_and_saves() {
        let gym = test_gym();
        let handler = CreateMemberHandler::new(gym.context.clone());

        let result = handler
            .handle(CreateMemberCommand {
                input: MemberInput::new("John", "Doe", "john@x.com", date(2024, 1, 1)),
            })
            .await
            .unwrap();

        assert_eq!(result.member.status, MemberStatus::Active);
        assert_eq!(result.member.membership_expiry, date(2025, 1, 1));
        assert!(result.renewal_notification.is_none());
        assert_eq!(gym.repository.save_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_saving() {
        let gym = test_gym();
        let handler = CreateMemberHandler::new(gym.context.clone());
        handler
            .handle(CreateMemberCommand {
                input: MemberInput::new("John", "Doe", "john@x.com", date(2024, 1, 1)),
            })
            .await
            .unwrap();

        let err = handler
            .handle(CreateMemberCommand {
                input: MemberInput::new("Johnny", "Doe", "John@X.com", date(2024, 1, 1)),
            })
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(gym.repository.save_count().await, 1);
    }

    #[tokio::test]
    async fn near_expiry_gets_immediate_reminder() {
        let gym = test_gym();
        let handler = CreateMemberHandler::new(gym.context.clone());

        let result = handler
            .handle(CreateMemberCommand {
                input: MemberInput::new("Jane", "Roe", "jane@x.com", date(2024, 1, 1))
                    .with_expiry(date(2024, 6, 15)),
            })
            .await
            .unwrap();

        let notification = result.renewal_notification.unwrap();
        assert!(notification.message().contains("2024-06-15"));
    }

    #[tokio::test]
    async fn failed_save_rolls_back_so_retry_succeeds() {
        let gym = flaky_gym(1);
        let handler = CreateMemberHandler::new(gym.context.clone());
        let input = MemberInput::new("John", "Doe", "john@x.com", date(2024, 1, 1))
            .with_expiry(date(2024, 6, 15));

        let err = handler
            .handle(CreateMemberCommand {
                input: input.clone(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MemberError::Infrastructure(_)));
        {
            let state = gym.context.state.lock().await;
            assert!(state.registry.is_empty());
            assert!(state.notifications.is_empty());
        }

        let result = handler.handle(CreateMemberCommand { input }).await.unwrap();
        assert!(result.renewal_notification.is_some());

        let state = gym.context.state.lock().await;
        assert_eq!(state.registry.len(), 1);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(gym.repository.save_count().await, 1);
    }
}
