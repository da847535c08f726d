//! Keyboard filter surface
//!
//! | key     | action                 |
//! |---------|------------------------|
//! | Y / U   | year - / +             |
//! | J / K   | min distance - / +     |
//! | N / M   | max distance - / +     |
//! | H       | next sector            |
//! | 0       | all sectors            |
//! | Enter   | run query              |
//!
//! Shift moves ten steps per press.

use galaxy_core::SectorFilter;
use galaxy_engine::ControlEvent;

use winit::keyboard::KeyCode;

const FAST_STEPS: i32 = 10;

pub fn control_for_key(key: KeyCode, fast: bool) -> Option<ControlEvent> {
    let steps = if fast { FAST_STEPS } else { 1 };

    let event = match key {
        KeyCode::KeyY => ControlEvent::NudgeYear(-steps),
        KeyCode::KeyU => ControlEvent::NudgeYear(steps),
        KeyCode::KeyJ => ControlEvent::NudgeMinDistance(-steps),
        KeyCode::KeyK => ControlEvent::NudgeMinDistance(steps),
        KeyCode::KeyN => ControlEvent::NudgeMaxDistance(-steps),
        KeyCode::KeyM => ControlEvent::NudgeMaxDistance(steps),
        KeyCode::KeyH => ControlEvent::CycleSector,
        KeyCode::Digit0 | KeyCode::Numpad0 => ControlEvent::SelectSector(SectorFilter::All),
        KeyCode::Enter | KeyCode::NumpadEnter => ControlEvent::RunQuery,
        _ => return None,
    };
    Some(event)
}
