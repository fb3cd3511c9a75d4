//! What each transition does to the auto-hide timer.

use super::types::StateKind;

/// Timer side effect of entering a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    /// Drop any pending auto-hide.
    Cancel,
    /// Replace any pending auto-hide with a fresh countdown.
    Restart,
}

pub struct StateTransition;

impl StateTransition {
    /// Entering loading or idle cancels the countdown; terminal states restart it.
    pub fn timer_directive(to: StateKind) -> TimerDirective {
        if to.is_terminal() {
            TimerDirective::Restart
        } else {
            TimerDirective::Cancel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_restart_timer() {
        assert_eq!(
            StateTransition::timer_directive(StateKind::Success),
            TimerDirective::Restart
        );
        assert_eq!(
            StateTransition::timer_directive(StateKind::Failure),
            TimerDirective::Restart
        );
    }

    #[test]
    fn non_terminal_states_cancel_timer() {
        assert_eq!(
            StateTransition::timer_directive(StateKind::Loading),
            TimerDirective::Cancel
        );
        assert_eq!(
            StateTransition::timer_directive(StateKind::Idle),
            TimerDirective::Cancel
        );
    }
}
