//! Lookup tables shared by the channel implementations.

use super::sequence::Breakpoint;

/// NTSC CPU clock in Hz.
pub const CPU_CLOCK_NTSC: f64 = 1_789_773.0;

/// Length counter reload values, indexed by the top five bits of register 3.
pub const LENGTH_COUNTER_LOAD: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, //
    12, 16, 24, 18, 48, 20, 96, 22, 192, 24, 72, 26, 16, 28, 32, 30,
];

/// Constant-volume levels for the pulse channels.
pub const PULSE_VOLUME: [f32; 16] = [
    0.0, 0.03, 0.06, 0.09, 0.12, 0.15, 0.18, 0.21, 0.24, 0.27, 0.3, 0.33, 0.36, 0.39, 0.42, 0.45,
];

/// Constant-volume levels for the noise channel.
pub const NOISE_VOLUME: [f32; 16] = [
    0.0, 0.06, 0.12, 0.18, 0.24, 0.30, 0.36, 0.42, 0.48, 0.54, 0.6, 0.66, 0.72, 0.78, 0.84, 0.9,
];

/// Playback rate of the noise wave tables, `[mode][period]`.
pub const NOISE_FREQUENCY: [[f64; 16]; 2] = [
    // Long sequence
    [
        12.933, 6.466, 3.233, 1.616, 0.808, 0.538, 0.404, 0.323, //
        0.256, 0.203, 0.136, 0.101, 0.068, 0.05, 0.025, 0.012,
    ],
    // Short sequence
    [
        1202.8, 601.4, 300.7, 150.35, 75.175, 50.125, 37.6, 30.075, //
        23.825, 18.95, 12.65, 9.475, 6.325, 4.725, 2.375, 1.175,
    ],
];

/// Slots in the pulse wave table.
pub const PULSE_TABLE_SIZE: u16 = 64;

const fn bp(index: u16, level: f32) -> Breakpoint {
    Breakpoint { index, level }
}

/// Pulse wave shapes per duty setting, as breakpoints over
/// [`PULSE_TABLE_SIZE`] slots.
pub static DUTY_SEQUENCES: [[Breakpoint; 5]; 4] = [
    [bp(0, 0.0), bp(7, 0.0), bp(8, 1.0), bp(16, 1.0), bp(17, 0.0)],
    [bp(0, 0.0), bp(7, 0.0), bp(8, 1.0), bp(24, 1.0), bp(25, 0.0)],
    [bp(0, 0.0), bp(7, 0.0), bp(8, 1.0), bp(40, 1.0), bp(41, 0.0)],
    [bp(0, 1.0), bp(7, 1.0), bp(8, 0.0), bp(16, 0.0), bp(17, 1.0)],
];
