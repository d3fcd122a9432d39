//! In-crate test doubles

use crate::device::OutputChannel;

/// Output channel that records its state and every write
#[derive(Debug, Default)]
pub(crate) struct TestChannel {
    pub active: bool,
    pub released: bool,
    pub writes: usize,
}

impl OutputChannel for TestChannel {
    fn activate(&mut self) {
        if !self.released {
            self.active = true;
        }
        self.writes += 1;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.writes += 1;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) {
        self.active = false;
        self.released = true;
    }
}

/// Build `n` fresh test channels
pub(crate) fn channels(n: usize) -> Vec<TestChannel> {
    (0..n).map(|_| TestChannel::default()).collect()
}
