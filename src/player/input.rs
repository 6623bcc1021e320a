/// Explicit input state fed into the simulation tick
use glam::Vec2;

/// Logical controls, independent of the physical key bound to them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

impl Action {
    const COUNT: usize = 5;

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
    /// Raw pointer motion in device units
    LookDelta(Vec2),
    LockPointer,
    UnlockPointer,
}

/// Held keys, pointer lock and pending look motion between ticks.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: [bool; Action::COUNT],
    pointer_locked: bool,
    pending_look: Vec2,
}

/// Everything one simulation tick needs from the input layer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub look: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(action) => self.held[action.slot()] = true,
            InputEvent::Released(action) => self.held[action.slot()] = false,
            InputEvent::LookDelta(delta) => {
                // Motion only steers the camera while the pointer is captured.
                if self.pointer_locked {
                    self.pending_look += delta;
                }
            }
            InputEvent::LockPointer => self.pointer_locked = true,
            InputEvent::UnlockPointer => {
                self.pointer_locked = false;
                self.pending_look = Vec2::ZERO;
            }
        }
    }

    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.slot()]
    }

    #[inline]
    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Snapshot for one tick. Accumulated look motion is consumed; held keys
    /// persist until released.
    pub fn frame(&mut self) -> TickInput {
        let look = std::mem::take(&mut self.pending_look);
        TickInput {
            forward: self.is_held(Action::Forward),
            backward: self.is_held(Action::Backward),
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            jump: self.is_held(Action::Jump),
            look,
        }
    }
}
