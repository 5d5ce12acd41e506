use super::CommandResult;
use crate::canvas::NUDGE_STEP;
use crate::state::EditorContext;

/// Toolbar actions on the composition.
///
/// Each command is valid only while no gesture is in progress. A rejected
/// command leaves the composition untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Grow or shrink the selected item
    NudgeSize(f32),
    DeleteSelected,
    Reset,
    BringToFront(usize),
}

impl Command {
    pub fn grow() -> Self {
        Command::NudgeSize(NUDGE_STEP)
    }

    pub fn shrink() -> Self {
        Command::NudgeSize(-NUDGE_STEP)
    }

    /// Whether the toolbar should offer this command right now
    pub fn is_available(&self, ctx: &EditorContext) -> bool {
        if !ctx.state().is_idle() {
            return false;
        }
        match self {
            Command::NudgeSize(_) | Command::DeleteSelected => ctx.composition.selected().is_some(),
            Command::Reset => !ctx.composition.is_empty(),
            Command::BringToFront(index) => *index < ctx.composition.len(),
        }
    }

    /// Execute the command with the given context
    pub fn execute(&self, ctx: &mut EditorContext) -> CommandResult {
        log::debug!("Executing {:?}", self);
        match self {
            Command::NudgeSize(delta) => {
                ctx.nudge_size(*delta)?;
            }
            Command::DeleteSelected => {
                ctx.delete_selected()?;
            }
            Command::Reset => ctx.reset()?,
            Command::BringToFront(index) => {
                ctx.bring_to_front(*index)?;
            }
        }
        Ok(())
    }
}
