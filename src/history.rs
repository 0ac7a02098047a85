use x11rb::protocol::xproto::Window;

/// Two-slot record of the last two distinct selections, used to jump back
/// and forth between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AltTabHistory {
    slots: [Option<Window>; 2],
    active: usize,
}

impl AltTabHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Window> {
        self.slots[self.active]
    }

    pub fn other(&self) -> Option<Window> {
        self.slots[self.active ^ 1]
    }

    /// Note a change of selection from `previous` to `selected`. Nothing
    /// happens when `selected` is already the active slot.
    pub fn record(&mut self, previous: Option<Window>, selected: Window) {
        if self.current() == Some(selected) {
            return;
        }
        self.slots[self.active] = previous.filter(|&window| window != selected);
        self.active ^= 1;
        self.slots[self.active] = Some(selected);
    }

    /// Flip to the other slot and return what it holds. An empty slot leaves
    /// the history untouched.
    pub fn swap(&mut self) -> Option<Window> {
        let target = self.other()?;
        self.active ^= 1;
        Some(target)
    }

    /// Drop every reference to `window`.
    pub fn forget(&mut self, window: Window) {
        for slot in self.slots.iter_mut() {
            if *slot == Some(window) {
                *slot = None;
            }
        }
    }

    pub fn contains(&self, window: Window) -> bool {
        self.slots.contains(&Some(window))
    }
}
