// input.rs - Keyboard commands and pointer-to-cell mapping

use conway::SpeedPreset;
use egui::{Key, Pos2};

/// Discrete user commands. The clock-related ones act on the driver,
/// everything else on the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Reseed,
    Clear,
    Faster,
    Slower,
    ResetSpeed,
    Preset(SpeedPreset),
}

pub const KEYMAP: &[(Key, Command)] = &[
    (Key::Space, Command::TogglePause),
    (Key::R, Command::Reseed),
    (Key::C, Command::Clear),
    (Key::ArrowUp, Command::Faster),
    (Key::ArrowDown, Command::Slower),
    (Key::Num0, Command::ResetSpeed),
    (Key::Num1, Command::Preset(SpeedPreset::Slow)),
    (Key::Num2, Command::Preset(SpeedPreset::Medium)),
    (Key::Num3, Command::Preset(SpeedPreset::Fast)),
];

pub fn command_for_key(key: Key) -> Option<Command> {
    KEYMAP.iter().find(|(k, _)| *k == key).map(|(_, c)| *c)
}

/// Commands for every mapped key pressed this frame.
pub fn pressed_commands(ctx: &egui::Context) -> Vec<Command> {
    ctx.input(|i| {
        KEYMAP
            .iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|(_, command)| *command)
            .collect()
    })
}

/// Grid index under `pointer` for a grid drawn at `origin`, or `None` when
/// the pointer is outside the grid.
pub fn cell_at(pointer: Pos2, origin: Pos2, cell_px: f32, cols: usize, rows: usize) -> Option<usize> {
    let x = (pointer.x - origin.x) / cell_px;
    let y = (pointer.y - origin.y) / cell_px;
    if !(x >= 0.0 && y >= 0.0) {
        return None;
    }
    let (cx, cy) = (x.floor() as usize, y.floor() as usize);
    if cx >= cols || cy >= rows {
        return None;
    }
    Some(cy * cols + cx)
}

/// Hover-to-flip: a cell flips once when the pointer enters it.
#[derive(Default, Debug)]
pub struct HoverEditor {
    last: Option<usize>,
}

impl HoverEditor {
    /// Feed the cell under the pointer (None when off the grid). Returns the
    /// cell to toggle, if the pointer just moved onto a new one.
    pub fn update(&mut self, hovered: Option<usize>) -> Option<usize> {
        let entered = match hovered {
            Some(i) if self.last != Some(i) => Some(i),
            _ => None,
        };
        self.last = hovered;
        entered
    }
}
