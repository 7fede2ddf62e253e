use std::time::Duration;

use crate::apu::tables::CPU_CLOCK_NTSC;

/// Interval at which the external scheduler is expected to call
/// [`Apu::clock`](crate::apu::Apu::clock).
pub const CLOCK_INTERVAL: Duration = Duration::from_millis(4);

/// Tunables for the channel model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApuConfig {
    /// CPU clock the timer periods divide (Hz).
    pub cpu_clock_hz: f64,
    /// Output level of the triangle channel while it is audible, `0.0..=1.0`.
    pub triangle_volume: f32,
}

impl Default for ApuConfig {
    fn default() -> Self {
        Self {
            cpu_clock_hz: CPU_CLOCK_NTSC,
            triangle_volume: 1.0,
        }
    }
}
