//! Noise channel register decoding and pre-rendered LFSR sequences.
//!
//! As with the pulse channels only constant volume is modeled.

use super::{
    Channel,
    length_counter::LengthCounter,
    sequence::{NoiseMode, NoiseSequence},
    tables::{NOISE_FREQUENCY, NOISE_VOLUME},
};

#[derive(Debug, Clone, PartialEq)]
pub struct NoiseChannel {
    length_halt: bool,
    constant_volume: bool,
    volume_envelope: u8,
    mode: NoiseMode,
    period: u8,
    length: LengthCounter,
    level: f32,
    long: NoiseSequence,
    short: NoiseSequence,
}

impl Default for NoiseChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseChannel {
    /// Builds the channel, rendering both LFSR sequences up front.
    pub fn new() -> Self {
        Self {
            length_halt: false,
            constant_volume: false,
            volume_envelope: 0,
            mode: NoiseMode::Long,
            period: 0,
            length: LengthCounter::default(),
            level: 0.0,
            long: NoiseSequence::generate(NoiseMode::Long),
            short: NoiseSequence::generate(NoiseMode::Short),
        }
    }

    pub fn mode(&self) -> NoiseMode {
        self.mode
    }

    /// Period index, low nibble of register 2.
    pub fn period(&self) -> u8 {
        self.period
    }

    pub fn length_halt(&self) -> bool {
        self.length_halt
    }

    pub fn constant_volume(&self) -> bool {
        self.constant_volume
    }

    pub fn volume_envelope(&self) -> u8 {
        self.volume_envelope
    }

    pub fn length_counter(&self) -> u8 {
        self.length.value()
    }

    /// Wave table for the current mode.
    pub fn sequence(&self) -> &NoiseSequence {
        match self.mode {
            NoiseMode::Long => &self.long,
            NoiseMode::Short => &self.short,
        }
    }
}

impl Channel for NoiseChannel {
    fn write_reg0(&mut self, value: u8) {
        self.length_halt = value & 0b0010_0000 != 0;
        self.constant_volume = value & 0b0001_0000 != 0;
        self.volume_envelope = value & 0b0000_1111;

        if self.constant_volume {
            self.level = NOISE_VOLUME[self.volume_envelope as usize];
        }
    }

    fn write_reg1(&mut self, _value: u8) {}

    fn write_reg2(&mut self, value: u8) {
        self.mode = NoiseMode::from_bit(value & 0b1000_0000 != 0);
        self.period = value & 0b0000_1111;
    }

    fn write_reg3(&mut self, value: u8) {
        self.length.load(value >> 3);
    }

    /// Envelope decay is not modeled.
    fn quarter_frame(&mut self) {}

    fn half_frame(&mut self) {
        self.length.clock(self.length_halt);
    }

    fn frequency(&self) -> f64 {
        NOISE_FREQUENCY[self.mode.index()][self.period as usize]
    }

    fn volume(&self) -> f32 {
        if self.length.active() {
            self.level
        } else {
            0.0
        }
    }
}
