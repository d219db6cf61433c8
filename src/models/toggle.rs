/// "Mark the next entry as a task" switch owned by the capture UI.
///
/// The flag only ever applies to one append: [`consume`](Self::consume)
/// hands it out and clears it in the same step, so a failed append cannot
/// leak it into the following entry.
#[derive(Debug, Default)]
pub struct TaskToggleState {
    next_is_task: bool,
}

impl TaskToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, on: bool) {
        self.next_is_task = on;
    }

    /// Flip the switch, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.next_is_task = !self.next_is_task;
        self.next_is_task
    }

    /// Current value, for display. Does not reset.
    pub fn is_set(&self) -> bool {
        self.next_is_task
    }

    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.next_is_task)
    }
}
