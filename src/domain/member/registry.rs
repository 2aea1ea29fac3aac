//! MemberRegistry - the authoritative member collection.
//!
//! Keeps members in insertion order, which is also the display order.
//! Every mutation is synchronous and visible to the next call.

use std::collections::HashSet;

use crate::domain::fitness::{NewProgressPhoto, NewWorkoutPlan, ProgressPhoto, WorkoutPlan};
use crate::domain::foundation::{MemberId, PhotoId, Timestamp, WorkoutPlanId};

use super::input::email_key;
use super::{Member, MemberError, MemberFilter, MemberInput, MemberPatch};

/// In-memory member collection enforcing id and email uniqueness.
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
    members: Vec<Member>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from previously persisted members.
    ///
    /// # Errors
    ///
    /// - `DuplicateId` / `DuplicateEmail` if the input violates uniqueness
    pub fn restore(members: Vec<Member>) -> Result<Self, MemberError> {
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();
        for member in &members {
            if !ids.insert(member.id) {
                return Err(MemberError::DuplicateId(member.id));
            }
            if !emails.insert(email_key(&member.email)) {
                return Err(MemberError::duplicate_email(member.email.clone()));
            }
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All members in insertion order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Registers a new member.
    ///
    /// Status defaults to active, last visit to the join date, and expiry to
    /// one year after joining unless supplied.
    ///
    /// # Errors
    ///
    /// - `Validation` for blank names, malformed email, future join date,
    ///   expiry before join date, or a blank custom plan
    /// - `DuplicateEmail` if the email is taken (case-insensitive)
    pub fn create(&mut self, input: MemberInput, now: Timestamp) -> Result<Member, MemberError> {
        let member = Member::register(MemberId::new(), input, now.date(), now)?;
        self.ensure_email_free(&member.email, None)?;
        self.members.push(member.clone());
        Ok(member)
    }

    /// Applies a partial update. The id and creation-derived fields are
    /// never regenerated.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if no member has this id
    /// - `Validation` if a supplied field is invalid
    /// - `DuplicateEmail` if the new email belongs to another member
    pub fn update(
        &mut self,
        id: MemberId,
        patch: MemberPatch,
        now: Timestamp,
    ) -> Result<Member, MemberError> {
        self.find(id)?;
        if let Some(email) = &patch.email {
            self.ensure_email_free(email, Some(id))?;
        }
        let member = self.find_mut(id)?;
        member.apply(patch, now.date(), now)?;
        Ok(member.clone())
    }

    /// Removes a member and everything it owns.
    ///
    /// Notifications and subscriptions referencing the member are not
    /// touched here.
    pub fn delete(&mut self, id: MemberId) -> Result<Member, MemberError> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| MemberError::member_not_found(id))?;
        Ok(self.members.remove(index))
    }

    pub fn find(&self, id: MemberId) -> Result<&Member, MemberError> {
        self.members
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| MemberError::member_not_found(id))
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Member> {
        let key = email_key(email);
        self.members.iter().find(|m| email_key(&m.email) == key)
    }

    /// Members matching the filter, in insertion order.
    pub fn list(&self, filter: &MemberFilter) -> Vec<&Member> {
        let query = filter
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        self.members
            .iter()
            .filter(|m| filter.status.map_or(true, |status| m.status == status))
            .filter(|m| query.as_deref().map_or(true, |q| m.matches_query(q)))
            .collect()
    }

    /// Appends a workout plan to a member.
    pub fn add_workout_plan(
        &mut self,
        member_id: MemberId,
        input: NewWorkoutPlan,
        now: Timestamp,
    ) -> Result<WorkoutPlan, MemberError> {
        let member = self.find_mut(member_id)?;
        let plan = WorkoutPlan::create(WorkoutPlanId::new(), input, now)?;
        member.workout_plans.push(plan.clone());
        member.touch(now);
        Ok(plan)
    }

    pub fn remove_workout_plan(
        &mut self,
        member_id: MemberId,
        plan_id: WorkoutPlanId,
        now: Timestamp,
    ) -> Result<WorkoutPlan, MemberError> {
        let member = self.find_mut(member_id)?;
        let index = member
            .workout_plans
            .iter()
            .position(|p| p.id == plan_id)
            .ok_or_else(|| MemberError::workout_plan_not_found(member_id, plan_id))?;
        let plan = member.workout_plans.remove(index);
        member.touch(now);
        Ok(plan)
    }

    /// Marks a plan completed and counts it as a visit on that day.
    pub fn complete_workout(
        &mut self,
        member_id: MemberId,
        plan_id: WorkoutPlanId,
        now: Timestamp,
    ) -> Result<WorkoutPlan, MemberError> {
        let member = self.find_mut(member_id)?;
        let plan = member
            .workout_plans
            .iter_mut()
            .find(|p| p.id == plan_id)
            .ok_or_else(|| MemberError::workout_plan_not_found(member_id, plan_id))?;
        plan.mark_completed(now);
        let plan = plan.clone();
        member.last_visit = Some(now.date());
        member.touch(now);
        Ok(plan)
    }

    /// Appends a progress photo to a member.
    pub fn add_progress_photo(
        &mut self,
        member_id: MemberId,
        input: NewProgressPhoto,
        now: Timestamp,
    ) -> Result<ProgressPhoto, MemberError> {
        let member = self.find_mut(member_id)?;
        let photo = ProgressPhoto::create(PhotoId::new(), input)?;
        member.progress_photos.push(photo.clone());
        member.touch(now);
        Ok(photo)
    }

    pub fn remove_progress_photo(
        &mut self,
        member_id: MemberId,
        photo_id: PhotoId,
        now: Timestamp,
    ) -> Result<ProgressPhoto, MemberError> {
        let member = self.find_mut(member_id)?;
        let index = member
            .progress_photos
            .iter()
            .position(|p| p.id == photo_id)
            .ok_or_else(|| MemberError::photo_not_found(member_id, photo_id))?;
        let photo = member.progress_photos.remove(index);
        member.touch(now);
        Ok(photo)
    }

    /// Records a gym visit; the last-visit date only moves forward.
    pub fn record_visit(&mut self, member_id: MemberId, now: Timestamp) -> Result<Member, MemberError> {
        let member = self.find_mut(member_id)?;
        let visited = now.date();
        if member.last_visit.map_or(true, |last| last < visited) {
            member.last_visit = Some(visited);
        }
        member.touch(now);
        Ok(member.clone())
    }

    pub(crate) fn find_mut(&mut self, id: MemberId) -> Result<&mut Member, MemberError> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| MemberError::member_not_found(id))
    }

    fn ensure_email_free(&self, email: &str, except: Option<MemberId>) -> Result<(), MemberError> {
        let key = email_key(email);
        let taken = self
            .members
            .iter()
            .any(|m| Some(m.id) != except && email_key(&m.email) == key);
        if taken {
            return Err(MemberError::duplicate_email(email.trim()));
        }
        Ok(())
    }
}
