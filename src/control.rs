//! Console key bindings for the control thread.
//!
//! | key       | action              |
//! | --------- | ------------------- |
//! | `f` / `F` | filter on / off     |
//! | `d` / `D` | delay on / off      |
//! | `h` / `H` | hall on / off       |
//! | `1`..`9`  | toggle band 0..8    |
//! | `0`       | all effects off     |
//! | `q`       | quit                |

use crate::engine::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Submit(Command),
    Quit,
}

/// Translate one key press into at most one action.
pub fn action_for_key(key: char) -> Option<ControlAction> {
    let command = match key {
        'q' => return Some(ControlAction::Quit),
        'f' => Command::EnableFilter,
        'F' => Command::DisableFilter,
        'd' => Command::EnableDelay,
        'D' => Command::DisableDelay,
        'h' => Command::EnableHall,
        'H' => Command::DisableHall,
        '0' => Command::AllEffectsOff,
        '1'..='9' => Command::ToggleBand(key as usize - '1' as usize),
        _ => return None,
    };
    Some(ControlAction::Submit(command))
}

/// Help line shown under the status panel.
pub const KEY_HELP: &str =
    " [f/F] filter  [d/D] delay  [h/H] hall  [1-9] band  [0] all off  [q] quit";
