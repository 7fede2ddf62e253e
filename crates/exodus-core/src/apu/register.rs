//! CPU-visible channel registers (`$4000-$400F`).

/// Channel a register belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Pulse1,
    Pulse2,
    Triangle,
    Noise,
}

/// Position of a register within its channel's four-register block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterSlot {
    Reg0,
    Reg1,
    Reg2,
    Reg3,
}

/// Channel registers by CPU address.
///
/// `$4009` and `$400D` are unused by the hardware and have no variant.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// `$4000` - Pulse 1: duty, length counter halt, constant volume, volume.
    Pulse1Control = 0x4000,
    /// `$4001` - Pulse 1: sweep unit.
    Pulse1Sweep = 0x4001,
    /// `$4002` - Pulse 1: timer low byte.
    Pulse1TimerLow = 0x4002,
    /// `$4003` - Pulse 1: timer high 3 bits + length counter load.
    Pulse1TimerHigh = 0x4003,

    /// `$4004` - Pulse 2: duty, length counter halt, constant volume, volume.
    Pulse2Control = 0x4004,
    /// `$4005` - Pulse 2: sweep unit.
    Pulse2Sweep = 0x4005,
    /// `$4006` - Pulse 2: timer low byte.
    Pulse2TimerLow = 0x4006,
    /// `$4007` - Pulse 2: timer high 3 bits + length counter load.
    Pulse2TimerHigh = 0x4007,

    /// `$4008` - Triangle: control flag + linear counter reload value.
    TriangleControl = 0x4008,
    /// `$400A` - Triangle: timer low byte.
    TriangleTimerLow = 0x400A,
    /// `$400B` - Triangle: timer high 3 bits + length counter load.
    TriangleTimerHigh = 0x400B,

    /// `$400C` - Noise: length counter halt, constant volume, volume.
    NoiseControl = 0x400C,
    /// `$400E` - Noise: mode flag and period index.
    NoiseModeAndPeriod = 0x400E,
    /// `$400F` - Noise: length counter load.
    NoiseLength = 0x400F,
}

impl Register {
    pub const fn addr(self) -> u16 {
        self as u16
    }

    pub const fn from_addr(addr: u16) -> Option<Self> {
        Some(match addr {
            0x4000 => Self::Pulse1Control,
            0x4001 => Self::Pulse1Sweep,
            0x4002 => Self::Pulse1TimerLow,
            0x4003 => Self::Pulse1TimerHigh,
            0x4004 => Self::Pulse2Control,
            0x4005 => Self::Pulse2Sweep,
            0x4006 => Self::Pulse2TimerLow,
            0x4007 => Self::Pulse2TimerHigh,
            0x4008 => Self::TriangleControl,
            0x400A => Self::TriangleTimerLow,
            0x400B => Self::TriangleTimerHigh,
            0x400C => Self::NoiseControl,
            0x400E => Self::NoiseModeAndPeriod,
            0x400F => Self::NoiseLength,
            _ => return None,
        })
    }

    pub const fn channel(self) -> ChannelId {
        match (self.addr() >> 2) & 0b11 {
            0 => ChannelId::Pulse1,
            1 => ChannelId::Pulse2,
            2 => ChannelId::Triangle,
            _ => ChannelId::Noise,
        }
    }

    pub const fn slot(self) -> RegisterSlot {
        match self.addr() & 0b11 {
            0 => RegisterSlot::Reg0,
            1 => RegisterSlot::Reg1,
            2 => RegisterSlot::Reg2,
            _ => RegisterSlot::Reg3,
        }
    }
}
