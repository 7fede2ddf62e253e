//! Sound channel model used for music and sound effect preview.
//!
//! Two pulse channels, the triangle, and the noise channel are driven by
//! register writes and by an external scheduler calling [`Apu::clock`] every
//! [`CLOCK_INTERVAL`](crate::config::CLOCK_INTERVAL). The model only produces
//! wave parameters (frequency, volume, duty); rendering them to audio is the
//! caller's job.
//!
//! The model does no locking. Register writes and clock ticks must be
//! serialized onto one timeline by the caller.
//!
//! Known gaps:
//! - Envelope decay is not modeled: only constant volume is supported.
//! - The pulse sweep unit is decoded but never applied to the period.

mod length_counter;
pub mod noise;
pub mod pulse;
pub mod register;
pub mod sequence;
pub mod tables;
pub mod triangle;

use tracing::trace;

use crate::config::ApuConfig;

pub use noise::NoiseChannel;
pub use pulse::{DutyCycle, PulseChannel, Sweep};
pub use register::{ChannelId, Register, RegisterSlot};
pub use sequence::{NoiseMode, NoiseSequence};
pub use triangle::TriangleChannel;

/// Steps in one sequencer cycle driven by [`Apu::clock`].
const SEQUENCER_STEPS: u8 = 4;

/// Wave parameters a renderer needs for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelParams {
    pub frequency: f64,
    pub volume: f32,
    /// Duty setting, for pulse channels.
    pub duty: Option<DutyCycle>,
}

/// Register-level interface shared by every channel.
pub trait Channel {
    fn write_reg0(&mut self, value: u8);
    fn write_reg1(&mut self, value: u8);
    fn write_reg2(&mut self, value: u8);
    fn write_reg3(&mut self, value: u8);

    /// Envelope and linear counter clock.
    fn quarter_frame(&mut self);
    /// Length counter (and sweep) clock.
    fn half_frame(&mut self);

    /// Playback frequency in Hz.
    fn frequency(&self) -> f64;
    /// Effective output level, 0.0 when muted.
    fn volume(&self) -> f32;

    fn write(&mut self, slot: RegisterSlot, value: u8) {
        match slot {
            RegisterSlot::Reg0 => self.write_reg0(value),
            RegisterSlot::Reg1 => self.write_reg1(value),
            RegisterSlot::Reg2 => self.write_reg2(value),
            RegisterSlot::Reg3 => self.write_reg3(value),
        }
    }

    fn params(&self) -> ChannelParams {
        ChannelParams {
            frequency: self.frequency(),
            volume: self.volume(),
            duty: None,
        }
    }
}

/// Parameters of all four channels at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApuSnapshot {
    pub pulse: [ChannelParams; 2],
    pub triangle: ChannelParams,
    pub noise: ChannelParams,
}

#[derive(Debug, Clone)]
pub struct Apu {
    pulse: [PulseChannel; 2],
    triangle: TriangleChannel,
    noise: NoiseChannel,
    ticks: u8,
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

impl Apu {
    pub fn new() -> Self {
        Self::with_config(ApuConfig::default())
    }

    pub fn with_config(config: ApuConfig) -> Self {
        Self {
            pulse: [
                PulseChannel::new(config.cpu_clock_hz),
                PulseChannel::new(config.cpu_clock_hz),
            ],
            triangle: TriangleChannel::new(config.cpu_clock_hz, config.triangle_volume),
            noise: NoiseChannel::new(),
            ticks: 0,
        }
    }

    /// Silences every channel the way the sound driver does at startup.
    pub fn reset(&mut self) {
        for pulse in &mut self.pulse {
            pulse.write_reg0(0x30);
            pulse.write_reg1(0x00);
            pulse.write_reg2(0x00);
            pulse.write_reg3(0x00);
        }
        self.triangle.write_reg0(0x80);
        self.triangle.write_reg2(0x00);
        self.triangle.write_reg3(0x00);
        self.noise.write_reg0(0x30);
        self.noise.write_reg2(0x00);
        self.noise.write_reg3(0x00);
    }

    /// Routes a write to a channel register. Returns `false` for addresses
    /// that are not channel registers.
    pub fn write(&mut self, addr: u16, value: u8) -> bool {
        match Register::from_addr(addr) {
            Some(reg) => {
                self.write_register(reg, value);
                true
            }
            None => {
                trace!("ignored APU write ${addr:04X} = {value:#04X}");
                false
            }
        }
    }

    pub fn write_register(&mut self, reg: Register, value: u8) {
        trace!(?reg, value, "APU write");
        self.channel_mut(reg.channel()).write(reg.slot(), value);
    }

    /// One sequencer tick. Every tick clocks the quarter frame; steps 1 and 3
    /// of each four-step cycle also clock the half frame.
    pub fn clock(&mut self) {
        self.quarter_frame();

        self.ticks += 1;
        if self.ticks >= SEQUENCER_STEPS {
            self.ticks = 0;
        } else if self.ticks % 2 == 1 {
            self.half_frame();
        }
    }

    pub fn quarter_frame(&mut self) {
        for pulse in &mut self.pulse {
            pulse.quarter_frame();
        }
        self.triangle.quarter_frame();
        self.noise.quarter_frame();
    }

    pub fn half_frame(&mut self) {
        for pulse in &mut self.pulse {
            pulse.half_frame();
        }
        self.triangle.half_frame();
        self.noise.half_frame();
    }

    pub fn set_triangle_volume(&mut self, volume: f32) {
        self.triangle.set_level(volume);
    }

    pub fn channel(&self, id: ChannelId) -> &dyn Channel {
        match id {
            ChannelId::Pulse1 => &self.pulse[0],
            ChannelId::Pulse2 => &self.pulse[1],
            ChannelId::Triangle => &self.triangle,
            ChannelId::Noise => &self.noise,
        }
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> &mut dyn Channel {
        match id {
            ChannelId::Pulse1 => &mut self.pulse[0],
            ChannelId::Pulse2 => &mut self.pulse[1],
            ChannelId::Triangle => &mut self.triangle,
            ChannelId::Noise => &mut self.noise,
        }
    }

    /// Pulse channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not 0 or 1.
    pub fn pulse(&self, index: usize) -> &PulseChannel {
        &self.pulse[index]
    }

    pub fn triangle(&self) -> &TriangleChannel {
        &self.triangle
    }

    pub fn noise(&self) -> &NoiseChannel {
        &self.noise
    }

    pub fn snapshot(&self) -> ApuSnapshot {
        ApuSnapshot {
            pulse: [self.pulse[0].params(), self.pulse[1].params()],
            triangle: self.triangle.params(),
            noise: self.noise.params(),
        }
    }
}
