//! Keyboard shortcuts for the builder.

use blockcraft_core::{Delta, Material};
use blockcraft_world::Command;
use winit::keyboard::{KeyCode, ModifiersState};

/// Map a pressed key plus the held modifiers to a builder command.
///
/// Ctrl and Cmd (super) are interchangeable. While either is held only the
/// file and history shortcuts are recognised.
pub fn command_for_key(key: KeyCode, modifiers: ModifiersState) -> Option<Command> {
    if modifiers.control_key() || modifiers.super_key() {
        return match key {
            KeyCode::KeyS => Some(Command::Save),
            KeyCode::KeyL => Some(Command::Load),
            KeyCode::KeyZ if modifiers.shift_key() => Some(Command::Redo),
            KeyCode::KeyZ => Some(Command::Undo),
            KeyCode::KeyY => Some(Command::Redo),
            _ => None,
        };
    }

    if let Some(material) = palette_slot(key).and_then(Material::from_palette_index) {
        return Some(Command::SetMaterial(material));
    }

    let command = match key {
        KeyCode::KeyG => Command::ToggleGrid,
        KeyCode::ArrowLeft | KeyCode::KeyA => Command::MoveGhost(Delta::LEFT),
        KeyCode::ArrowRight | KeyCode::KeyD => Command::MoveGhost(Delta::RIGHT),
        KeyCode::ArrowUp | KeyCode::KeyW => Command::MoveGhost(Delta::FORWARD),
        KeyCode::ArrowDown | KeyCode::KeyS => Command::MoveGhost(Delta::BACK),
        KeyCode::KeyQ | KeyCode::Minus | KeyCode::NumpadSubtract => Command::MoveGhost(Delta::DOWN),
        KeyCode::KeyE | KeyCode::Equal | KeyCode::NumpadAdd => Command::MoveGhost(Delta::UP),
        KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => Command::Place {
            target: None,
            material: None,
        },
        KeyCode::Delete | KeyCode::Backspace => Command::Remove { target: None },
        _ => return None,
    };
    Some(command)
}

/// Zero-based palette slot for the digit keys 1-5.
fn palette_slot(key: KeyCode) -> Option<usize> {
    let slot = match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => 0,
        KeyCode::Digit2 | KeyCode::Numpad2 => 1,
        KeyCode::Digit3 | KeyCode::Numpad3 => 2,
        KeyCode::Digit4 | KeyCode::Numpad4 => 3,
        KeyCode::Digit5 | KeyCode::Numpad5 => 4,
        _ => return None,
    };
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(key: KeyCode) -> Option<Command> {
        command_for_key(key, ModifiersState::empty())
    }

    #[test]
    fn digits_select_palette_in_order() {
        let picked: Vec<_> = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
        ]
        .into_iter()
        .map(bare)
        .collect();
        assert_eq!(
            picked,
            Material::ALL
                .into_iter()
                .map(|m| Some(Command::SetMaterial(m)))
                .collect::<Vec<_>>()
        );
        assert_eq!(bare(KeyCode::Digit6), None);
    }

    #[test]
    fn ctrl_and_cmd_shortcuts() {
        for held in [ModifiersState::CONTROL, ModifiersState::SUPER] {
            assert_eq!(command_for_key(KeyCode::KeyS, held), Some(Command::Save));
            assert_eq!(command_for_key(KeyCode::KeyL, held), Some(Command::Load));
            assert_eq!(command_for_key(KeyCode::KeyZ, held), Some(Command::Undo));
            assert_eq!(
                command_for_key(KeyCode::KeyZ, held | ModifiersState::SHIFT),
                Some(Command::Redo)
            );
            assert_eq!(command_for_key(KeyCode::KeyY, held), Some(Command::Redo));
            assert_eq!(command_for_key(KeyCode::KeyA, held), None);
        }
    }

    #[test]
    fn plain_s_moves_instead_of_saving() {
        assert_eq!(bare(KeyCode::KeyS), Some(Command::MoveGhost(Delta::BACK)));
        assert_eq!(bare(KeyCode::KeyZ), None);
    }

    #[test]
    fn movement_keys() {
        assert_eq!(bare(KeyCode::ArrowLeft), Some(Command::MoveGhost(Delta::LEFT)));
        assert_eq!(bare(KeyCode::KeyD), Some(Command::MoveGhost(Delta::RIGHT)));
        assert_eq!(bare(KeyCode::KeyW), Some(Command::MoveGhost(Delta::FORWARD)));
        assert_eq!(bare(KeyCode::Minus), Some(Command::MoveGhost(Delta::DOWN)));
        assert_eq!(bare(KeyCode::KeyE), Some(Command::MoveGhost(Delta::UP)));
    }

    #[test]
    fn edit_keys_target_the_ghost() {
        let place = Some(Command::Place {
            target: None,
            material: None,
        });
        assert_eq!(bare(KeyCode::Enter), place);
        assert_eq!(bare(KeyCode::Space), place);
        assert_eq!(
            bare(KeyCode::Backspace),
            Some(Command::Remove { target: None })
        );
        assert_eq!(bare(KeyCode::KeyG), Some(Command::ToggleGrid));
    }
}
