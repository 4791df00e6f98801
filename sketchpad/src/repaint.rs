/// Whether mutating calls flush on their own
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepaintMode {
    /// Every mutating call ends with a flush
    #[default]
    Auto,
    /// Flushes happen only on an explicit `repaint`
    Manual,
}

/// Decides, after each mutating call, whether the buffer goes to the display now.
///
/// Switching modes never flushes by itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct RepaintScheduler {
    mode: RepaintMode,
}
impl RepaintScheduler {
    pub fn mode(&self) -> RepaintMode {
        self.mode
    }

    pub fn is_auto(&self) -> bool {
        self.mode == RepaintMode::Auto
    }

    pub fn set_auto(&mut self, auto: bool) {
        self.mode = match auto {
            true => RepaintMode::Auto,
            false => RepaintMode::Manual,
        };
    }

    /// Called at the end of every mutating operation
    pub fn after_mutation(&self) -> bool {
        self.is_auto()
    }
}
