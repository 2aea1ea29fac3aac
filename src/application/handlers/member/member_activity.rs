//! Handlers for what a member does at the gym: workout plans, progress
//! photos and visits.

use tracing::info;

use crate::application::GymContext;
use crate::domain::fitness::{NewProgressPhoto, NewWorkoutPlan, ProgressPhoto, WorkoutPlan};
use crate::domain::foundation::{MemberId, PhotoId, WorkoutPlanId};
use crate::domain::member::{Member, MemberError};

/// Workout plan commands.
#[derive(Debug, Clone)]
pub enum WorkoutPlanCommand {
    Add {
        member_id: MemberId,
        plan: NewWorkoutPlan,
    },
    Remove {
        member_id: MemberId,
        plan_id: WorkoutPlanId,
    },
    /// Marks the plan done and records a visit.
    Complete {
        member_id: MemberId,
        plan_id: WorkoutPlanId,
    },
}

pub struct WorkoutPlanHandler {
    context: GymContext,
}

impl WorkoutPlanHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: WorkoutPlanCommand) -> Result<WorkoutPlan, MemberError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let before = state.clone();

        let (member_id, plan, action) = match cmd {
            WorkoutPlanCommand::Add { member_id, plan } => {
                (member_id, state.registry.add_workout_plan(member_id, plan, now)?, "added")
            }
            WorkoutPlanCommand::Remove { member_id, plan_id } => (
                member_id,
                state.registry.remove_workout_plan(member_id, plan_id, now)?,
                "removed",
            ),
            WorkoutPlanCommand::Complete { member_id, plan_id } => (
                member_id,
                state.registry.complete_workout(member_id, plan_id, now)?,
                "completed",
            ),
        };

        self.context.commit(&mut state, before).await?;

        info!(member_id = %member_id, plan_id = %plan.id, action, "Workout plan changed");
        Ok(plan)
    }
}

/// Progress photo commands.
#[derive(Debug, Clone)]
pub enum ProgressPhotoCommand {
    Add {
        member_id: MemberId,
        photo: NewProgressPhoto,
    },
    Remove {
        member_id: MemberId,
        photo_id: PhotoId,
    },
}

pub struct ProgressPhotoHandler {
    context: GymContext,
}

impl ProgressPhotoHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: ProgressPhotoCommand) -> Result<ProgressPhoto, MemberError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let before = state.clone();

        let (member_id, photo) = match cmd {
            ProgressPhotoCommand::Add { member_id, photo } => {
                (member_id, state.registry.add_progress_photo(member_id, photo, now)?)
            }
            ProgressPhotoCommand::Remove { member_id, photo_id } => {
                (member_id, state.registry.remove_progress_photo(member_id, photo_id, now)?)
            }
        };

        self.context.commit(&mut state, before).await?;

        info!(member_id = %member_id, photo_id = %photo.id, "Progress photos changed");
        Ok(photo)
    }
}

/// Command to record a gym visit at the current time.
#[derive(Debug, Clone)]
pub struct RecordVisitCommand {
    pub member_id: MemberId,
}

pub struct RecordVisitHandler {
    context: GymContext,
}

impl RecordVisitHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: RecordVisitCommand) -> Result<Member, MemberError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let before = state.clone();
        let member = state.registry.record_visit(cmd.member_id, now)?;
        self.context.commit(&mut state, before).await?;

        info!(member_id = %member.id, "Visit recorded");
        Ok(member)
    }
}
