//! Pulse channel register decoding.
//!
//! Only constant volume without sweep is modeled. Sweep fields are decoded and
//! kept for when the sweep unit is implemented, but never alter the period.
//! In envelope mode the output keeps its last constant level.

use super::{
    Channel, ChannelParams,
    length_counter::LengthCounter,
    sequence::Breakpoint,
    tables::{CPU_CLOCK_NTSC, DUTY_SEQUENCES, PULSE_TABLE_SIZE, PULSE_VOLUME},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DutyCycle {
    /// 12.5 %
    #[default]
    Eighth,
    /// 25 %
    Quarter,
    /// 50 %
    Half,
    /// 75 % (negated 25 %)
    ThreeQuarters,
}

impl DutyCycle {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Eighth,
            1 => Self::Quarter,
            2 => Self::Half,
            _ => Self::ThreeQuarters,
        }
    }

    pub const fn ratio(self) -> f32 {
        match self {
            Self::Eighth => 0.125,
            Self::Quarter => 0.25,
            Self::Half => 0.5,
            Self::ThreeQuarters => 0.75,
        }
    }

    /// Wave table breakpoints for this duty setting.
    pub fn waveform(self) -> &'static [Breakpoint] {
        &DUTY_SEQUENCES[self as usize]
    }
}

/// Decoded sweep register (`$4001`/`$4005`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sweep {
    pub enabled: bool,
    pub period: u8,
    pub negate: bool,
    pub shift: u8,
}

impl Sweep {
    fn write(&mut self, value: u8) {
        self.enabled = value & 0b1000_0000 != 0;
        self.period = (value >> 4) & 0b0000_0111;
        self.negate = value & 0b0000_1000 != 0;
        self.shift = value & 0b0000_0111;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PulseChannel {
    duty: DutyCycle,
    length_halt: bool,
    constant_volume: bool,
    volume_envelope: u8,
    sweep: Sweep,
    timer_low: u8,
    timer_high: u8,
    length: LengthCounter,
    level: f32,
    clock_hz: f64,
}

impl Default for PulseChannel {
    fn default() -> Self {
        Self::new(CPU_CLOCK_NTSC)
    }
}

impl PulseChannel {
    pub fn new(clock_hz: f64) -> Self {
        Self {
            duty: DutyCycle::default(),
            length_halt: false,
            constant_volume: false,
            volume_envelope: 0,
            sweep: Sweep::default(),
            timer_low: 0,
            timer_high: 0,
            length: LengthCounter::default(),
            level: 0.0,
            clock_hz,
        }
    }

    pub fn duty(&self) -> DutyCycle {
        self.duty
    }

    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    pub fn length_halt(&self) -> bool {
        self.length_halt
    }

    pub fn constant_volume(&self) -> bool {
        self.constant_volume
    }

    /// Volume (constant mode) or envelope period, low nibble of register 0.
    pub fn volume_envelope(&self) -> u8 {
        self.volume_envelope
    }

    /// 11-bit timer period.
    pub fn timer(&self) -> u16 {
        (u16::from(self.timer_high) << 8) | u16::from(self.timer_low)
    }

    pub fn length_counter(&self) -> u8 {
        self.length.value()
    }
}

impl Channel for PulseChannel {
    fn write_reg0(&mut self, value: u8) {
        self.duty = DutyCycle::from_bits(value >> 6);
        self.length_halt = value & 0b0010_0000 != 0;
        self.constant_volume = value & 0b0001_0000 != 0;
        self.volume_envelope = value & 0b0000_1111;

        if self.constant_volume {
            self.level = PULSE_VOLUME[self.volume_envelope as usize];
        }
    }

    fn write_reg1(&mut self, value: u8) {
        self.sweep.write(value);
    }

    fn write_reg2(&mut self, value: u8) {
        self.timer_low = value;
    }

    fn write_reg3(&mut self, value: u8) {
        self.timer_high = value & 0b0000_0111;
        self.length.load(value >> 3);
    }

    /// Envelope decay is not modeled.
    fn quarter_frame(&mut self) {}

    /// Clocks the length counter; the sweep unit is not modeled.
    fn half_frame(&mut self) {
        self.length.clock(self.length_halt);
    }

    fn frequency(&self) -> f64 {
        self.clock_hz / f64::from((u32::from(self.timer()) + 1) << 4)
    }

    fn volume(&self) -> f32 {
        if self.length.active() {
            self.level
        } else {
            0.0
        }
    }

    fn params(&self) -> ChannelParams {
        ChannelParams {
            frequency: self.frequency(),
            volume: self.volume(),
            duty: Some(self.duty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_register_fields() {
        let mut pulse = PulseChannel::default();
        pulse.write_reg0(0b1011_1010);
        pulse.write_reg3(0x00);

        assert_eq!(pulse.duty(), DutyCycle::Half);
        assert!(pulse.length_halt());
        assert!(pulse.constant_volume());
        assert_eq!(pulse.volume_envelope(), 0x0A);
        assert_eq!(pulse.volume(), PULSE_VOLUME[0x0A]);
    }

    #[test]
    fn envelope_mode_keeps_last_level() {
        let mut pulse = PulseChannel::default();
        pulse.write_reg0(0x3C);
        pulse.write_reg3(0x00);
        pulse.write_reg0(0x23);
        assert!(!pulse.constant_volume());
        assert_eq!(pulse.volume(), PULSE_VOLUME[0x0C]);
    }

    #[test]
    fn frequency_from_timer() {
        let mut pulse = PulseChannel::default();
        pulse.write_reg2(0xFD);
        pulse.write_reg3(0x00);
        assert_eq!(pulse.timer(), 0x0FD);
        assert!((pulse.frequency() - 440.4).abs() < 0.1);

        pulse.write_reg3(0b0000_0011);
        assert_eq!(pulse.timer(), 0x3FD);
        assert_eq!(pulse.frequency(), CPU_CLOCK_NTSC / (0x3FE as f64 * 16.0));
    }

    #[test]
    fn sweep_is_decoded_but_not_applied() {
        let mut pulse = PulseChannel::default();
        pulse.write_reg2(0x20);
        pulse.write_reg3(0x01);
        let before = pulse.frequency();

        pulse.write_reg1(0b1101_1010);
        for _ in 0..8 {
            pulse.half_frame();
        }

        assert_eq!(
            pulse.sweep(),
            Sweep {
                enabled: true,
                period: 5,
                negate: true,
                shift: 2
            }
        );
        assert_eq!(pulse.frequency(), before);
    }

    #[test]
    fn expired_length_counter_mutes() {
        let mut pulse = PulseChannel::default();
        pulse.write_reg0(0x1F); // constant volume, no halt
        pulse.write_reg3(0b0001_1000); // length index 3 -> 2

        assert_eq!(pulse.length_counter(), 2);
        assert_eq!(pulse.volume(), PULSE_VOLUME[15]);
        pulse.half_frame();
        pulse.half_frame();
        assert_eq!(pulse.volume(), 0.0);

        // Halt only freezes the counter; it does not unmute an expired one.
        pulse.write_reg0(0x3F);
        assert_eq!(pulse.length_counter(), 0);
        assert_eq!(pulse.volume(), 0.0);
    }

    #[test]
    fn halt_freezes_a_running_counter() {
        let mut pulse = PulseChannel::default();
        pulse.write_reg0(0x3F);
        pulse.write_reg3(0b0001_1000);
        for _ in 0..4 {
            pulse.half_frame();
        }
        assert_eq!(pulse.length_counter(), 2);
        assert_eq!(pulse.volume(), PULSE_VOLUME[15]);
    }

    #[test]
    fn duty_waveforms() {
        assert_eq!(DutyCycle::from_bits(0b1101).ratio(), 0.25);
        assert_eq!(DutyCycle::Half.waveform()[3].index, 40);
        assert_eq!(DutyCycle::ThreeQuarters.waveform()[0].level, 1.0);
    }

    #[test]
    fn waveforms_fit_the_wave_table() {
        for duty in [
            DutyCycle::Eighth,
            DutyCycle::Quarter,
            DutyCycle::Half,
            DutyCycle::ThreeQuarters,
        ] {
            let points = duty.waveform();
            assert_eq!(points[0].index, 0, "{duty:?}");
            assert!(points.windows(2).all(|pair| pair[0].index < pair[1].index));
            assert!(points.iter().all(|point| point.index < PULSE_TABLE_SIZE));
        }
    }
}
