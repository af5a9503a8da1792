/// Runs a setup step exactly once, however many times the owner asks.
#[derive(Debug, Default)]
pub struct SetupOnce {
    done: bool,
}

impl SetupOnce {
    pub fn new() -> Self {
        Self { done: false }
    }

    /// Returns `true` when `setup` actually ran.
    pub fn run<F: FnOnce()>(&mut self, setup: F) -> bool {
        if self.done {
            return false;
        }
        setup();
        self.done = true;
        true
    }
}
