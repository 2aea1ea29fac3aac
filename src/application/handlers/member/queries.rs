//! Member read queries.

use crate::application::GymContext;
use crate::domain::foundation::MemberId;
use crate::domain::member::{Member, MemberError, MemberFilter};

/// Query for a single member.
#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub member_id: MemberId,
}

pub struct GetMemberHandler {
    context: GymContext,
}

impl GetMemberHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, query: GetMemberQuery) -> Result<Member, MemberError> {
        let state = self.context.state.lock().await;
        state.registry.find(query.member_id).cloned()
    }
}

/// Query for members matching a filter.
#[derive(Debug, Clone, Default)]
pub struct ListMembersQuery {
    pub filter: MemberFilter,
}

pub struct ListMembersHandler {
    context: GymContext,
}

impl ListMembersHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    /// Matches in insertion order.
    pub async fn handle(&self, query: ListMembersQuery) -> Vec<Member> {
        let state = self.context.state.lock().await;
        state
            .registry
            .list(&query.filter)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::test_support::{date, test_gym};
    use crate::domain::member::{MemberInput, MemberStatus};

    #[tokio::test]
    async fn list_filters_by_query_and_status() {
        let gym = test_gym();
        let now = gym.context.now();
        {
            let mut state = gym.context.state.lock().await;
            state
                .registry
                .create(MemberInput::new("Alice", "Smith", "alice@gym.io", date(2024, 1, 1)), now)
                .unwrap();
            state
                .registry
                .create(MemberInput::new("Bob", "Jones", "bob@gym.io", date(2024, 1, 1)), now)
                .unwrap();
        }
        let handler = ListMembersHandler::new(gym.context.clone());

        let all = handler.handle(ListMembersQuery::default()).await;
        assert_eq!(all.len(), 2);

        let smith = handler
            .handle(ListMembersQuery { filter: MemberFilter::query("SMI") })
            .await;
        assert_eq!(smith.len(), 1);
        assert_eq!(smith[0].first_name, "Alice");

        let suspended = handler
            .handle(ListMembersQuery { filter: MemberFilter::status(MemberStatus::Suspended) })
            .await;
        assert!(suspended.is_empty());
    }

    #[tokio::test]
    async fn get_unknown_member_is_not_found() {
        let gym = test_gym();
        let err = GetMemberHandler::new(gym.context.clone())
            .handle(GetMemberQuery { member_id: MemberId::new() })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
