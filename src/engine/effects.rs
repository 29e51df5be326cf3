#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Filter,
    Delay,
    Hall,
}

/// Plain copy of the effect switches, safe to ship between threads.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectFlags {
    pub filter: bool,
    pub delay: bool,
    pub hall: bool,
}

impl EffectFlags {
    pub fn get(&self, effect: Effect) -> bool {
        match effect {
            Effect::Filter => self.filter,
            Effect::Delay => self.delay,
            Effect::Hall => self.hall,
        }
    }
}

/// Which effects the render thread is currently running.
///
/// Delay and hall share the delay line and are never on together: enabling
/// either one switches the other off. Filter is independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectState {
    flags: EffectFlags,
}

impl EffectState {
    /// If both `delay` and `hall` are requested, hall wins.
    pub fn new(filter: bool, delay: bool, hall: bool) -> Self {
        Self {
            flags: EffectFlags {
                filter,
                delay: delay && !hall,
                hall,
            },
        }
    }

    pub fn from_flags(flags: EffectFlags) -> Self {
        Self::new(flags.filter, flags.delay, flags.hall)
    }

    #[inline]
    pub fn is_enabled(&self, effect: Effect) -> bool {
        self.flags.get(effect)
    }

    pub fn flags(&self) -> EffectFlags {
        self.flags
    }

    /// Apply one effect-switch command.
    ///
    /// `ToggleBand` does not touch the effect switches; the engine routes it
    /// to the filter bank.
    pub fn apply(&mut self, command: Command) {
        let flags = &mut self.flags;
        match command {
            Command::EnableFilter => flags.filter = true,
            Command::DisableFilter => flags.filter = false,
            Command::EnableDelay => {
                flags.hall = false;
                flags.delay = true;
            }
            Command::EnableHall => {
                flags.delay = false;
                flags.hall = true;
            }
            Command::DisableDelay => flags.delay = false,
            Command::DisableHall => flags.hall = false,
            Command::AllEffectsOff => *flags = EffectFlags::default(),
            Command::ToggleBand(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabling_hall_turns_delay_off() {
        let mut state = EffectState::new(false, true, false);
        state.apply(Command::EnableHall);

        assert!(!state.is_enabled(Effect::Delay));
        assert!(state.is_enabled(Effect::Hall));
    }

    #[test]
    fn enabling_delay_turns_hall_off() {
        let mut state = EffectState::new(false, false, true);
        state.apply(Command::EnableDelay);

        assert!(state.is_enabled(Effect::Delay));
        assert!(!state.is_enabled(Effect::Hall));
    }

    #[test]
    fn filter_is_independent_of_delay_and_hall() {
        let mut state = EffectState::default();
        state.apply(Command::EnableFilter);
        state.apply(Command::EnableDelay);
        state.apply(Command::EnableHall);
        assert!(state.is_enabled(Effect::Filter));

        state.apply(Command::DisableFilter);
        assert!(!state.is_enabled(Effect::Filter));
        assert!(state.is_enabled(Effect::Hall));
    }

    #[test]
    fn disable_only_touches_its_own_effect() {
        let mut state = EffectState::new(true, true, false);
        state.apply(Command::DisableHall);
        assert!(state.is_enabled(Effect::Delay));

        state.apply(Command::DisableDelay);
        assert!(!state.is_enabled(Effect::Delay));
        assert!(state.is_enabled(Effect::Filter));
    }

    #[test]
    fn all_effects_off_clears_everything() {
        let mut state = EffectState::new(true, false, true);
        state.apply(Command::AllEffectsOff);
        assert_eq!(state.flags(), EffectFlags::default());
    }

    #[test]
    fn conflicting_initial_state_keeps_hall() {
        let state = EffectState::new(false, true, true);
        assert!(state.is_enabled(Effect::Hall));
        assert!(!state.is_enabled(Effect::Delay));
    }

    #[test]
    fn exclusion_holds_for_any_command_sequence() {
        let commands = [
            Command::EnableDelay,
            Command::EnableHall,
            Command::DisableHall,
            Command::EnableHall,
            Command::EnableDelay,
            Command::AllEffectsOff,
            Command::EnableHall,
            Command::DisableDelay,
            Command::EnableDelay,
        ];

        let mut state = EffectState::default();
        for command in commands {
            state.apply(command);
            let flags = state.flags();
            assert!(!(flags.delay && flags.hall), "after {:?}", command);
        }
    }
}
