//! Three-phase action execution.

use crate::action::{ActionContext, ActionTransition};
use crate::world::World;

use super::errors::{TransitionPhase, TransitionPhaseError};

/// Runs `pre_validate → apply → post_validate`, tagging failures with the
/// phase that produced them.
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    world: &mut World,
    ctx: &ActionContext<'_>,
) -> Result<T::Output, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(world, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let output = transition
        .apply(world, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(world, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(output)
}
