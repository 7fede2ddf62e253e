//! Triangle channel state and linear counter.

use super::{
    Channel,
    length_counter::LengthCounter,
    tables::CPU_CLOCK_NTSC,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TriangleChannel {
    control_flag: bool,
    linear_reload_value: u8,
    linear_counter: u8,
    linear_reload: bool,
    length: LengthCounter,
    timer_low: u8,
    timer_high: u8,
    level: f32,
    clock_hz: f64,
}

impl Default for TriangleChannel {
    fn default() -> Self {
        Self::new(CPU_CLOCK_NTSC, 1.0)
    }
}

impl TriangleChannel {
    pub fn new(clock_hz: f64, level: f32) -> Self {
        Self {
            control_flag: false,
            linear_reload_value: 0,
            linear_counter: 0,
            linear_reload: false,
            length: LengthCounter::default(),
            timer_low: 0,
            timer_high: 0,
            level: level.clamp(0.0, 1.0),
            clock_hz,
        }
    }

    /// Level used while the channel is audible, clamped to `0.0..=1.0`.
    pub fn set_level(&mut self, level: f32) {
        self.level = level.clamp(0.0, 1.0);
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Linear counter control / length counter halt flag.
    pub fn control_flag(&self) -> bool {
        self.control_flag
    }

    pub fn linear_reload_value(&self) -> u8 {
        self.linear_reload_value
    }

    pub fn linear_counter(&self) -> u8 {
        self.linear_counter
    }

    pub fn length_counter(&self) -> u8 {
        self.length.value()
    }

    pub fn timer(&self) -> u16 {
        (u16::from(self.timer_high) << 8) | u16::from(self.timer_low)
    }
}

impl Channel for TriangleChannel {
    fn write_reg0(&mut self, value: u8) {
        self.control_flag = value & 0b1000_0000 != 0;
        self.linear_reload_value = value & 0b0111_1111;
        self.length.clear();
    }

    fn write_reg1(&mut self, _value: u8) {}

    fn write_reg2(&mut self, value: u8) {
        self.timer_low = value;
    }

    fn write_reg3(&mut self, value: u8) {
        self.timer_high = value & 0b0000_0111;
        self.linear_reload = true;
        if !self.control_flag {
            self.length.load(value >> 3);
        }
    }

    fn quarter_frame(&mut self) {
        if self.linear_reload {
            self.linear_counter = self.linear_reload_value;
        } else if self.linear_counter > 0 {
            self.linear_counter -= 1;
        }

        if !self.control_flag {
            self.linear_reload = false;
        }
    }

    fn half_frame(&mut self) {
        self.length.clock(self.control_flag);
    }

    fn frequency(&self) -> f64 {
        self.clock_hz / f64::from((u32::from(self.timer()) + 1) << 5)
    }

    fn volume(&self) -> f32 {
        if self.linear_counter == 0 && !self.length.active() {
            0.0
        } else {
            self.level
        }
    }
}
