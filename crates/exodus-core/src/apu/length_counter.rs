//! Length counter shared by pulse, triangle, and noise channels.

use super::tables::LENGTH_COUNTER_LOAD;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct LengthCounter {
    value: u8,
}

impl LengthCounter {
    pub(super) fn load(&mut self, index: u8) {
        self.value = LENGTH_COUNTER_LOAD[(index & 0b1_1111) as usize];
    }

    pub(super) fn clear(&mut self) {
        self.value = 0;
    }

    pub(super) fn clock(&mut self, halt: bool) {
        if self.value > 0 && !halt {
            self.value -= 1;
        }
    }

    pub(super) fn active(&self) -> bool {
        self.value > 0
    }

    pub(super) fn value(&self) -> u8 {
        self.value
    }
}
