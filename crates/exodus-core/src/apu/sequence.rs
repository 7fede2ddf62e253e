//! Wave shapes handed to the external renderer.

/// One point of a piecewise-linear wave table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub index: u16,
    pub level: f32,
}

/// Noise LFSR feedback mode (bit 7 of the period register).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoiseMode {
    /// Feedback from bits 0 and 1: 32767-step sequence.
    #[default]
    Long,
    /// Feedback from bits 0 and 6: 93-step sequence.
    Short,
}

impl NoiseMode {
    pub const fn from_bit(set: bool) -> Self {
        if set { Self::Short } else { Self::Long }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Long => 0,
            Self::Short => 1,
        }
    }

    const fn tap(self) -> u16 {
        match self {
            Self::Long => 1,
            Self::Short => 6,
        }
    }

    pub const fn steps(self) -> usize {
        match self {
            Self::Long => 32_767,
            Self::Short => 93,
        }
    }
}

/// Output level switching at `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelChange {
    pub step: u16,
    pub level: u8,
}

/// One period of the noise LFSR output, stored as level changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseSequence {
    mode: NoiseMode,
    changes: Vec<LevelChange>,
}

impl NoiseSequence {
    /// Runs the 15-bit LFSR from its power-on state for one period of `mode`.
    pub fn generate(mode: NoiseMode) -> Self {
        let tap = mode.tap();
        let mut register: u16 = 1;
        let mut previous = None;
        let mut changes = Vec::new();

        for step in 0..mode.steps() {
            // Output is high while bit 0 is clear.
            let level = ((register & 1) ^ 1) as u8;
            if previous != Some(level) {
                changes.push(LevelChange {
                    step: step as u16,
                    level,
                });
                previous = Some(level);
            }

            let feedback = (register ^ (register >> tap)) & 1;
            register = (register >> 1) | (feedback << 14);
        }

        Self { mode, changes }
    }

    pub fn mode(&self) -> NoiseMode {
        self.mode
    }

    pub fn steps(&self) -> usize {
        self.mode.steps()
    }

    pub fn changes(&self) -> &[LevelChange] {
        &self.changes
    }

    /// Output level at `step`, wrapping around the period.
    pub fn level_at(&self, step: usize) -> u8 {
        let step = step % self.steps();
        let upto = self
            .changes
            .partition_point(|change| change.step as usize <= step);
        self.changes[..upto].last().map_or(0, |change| change.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_sequence_is_balanced() {
        let sequence = NoiseSequence::generate(NoiseMode::Long);
        assert_eq!(sequence.steps(), 32_767);
        assert_eq!(sequence.level_at(0), 0);

        let high: usize = (0..sequence.steps())
            .map(|step| sequence.level_at(step) as usize)
            .sum();
        assert_eq!(high, 16_383);
    }

    #[test]
    fn changes_alternate() {
        for mode in [NoiseMode::Long, NoiseMode::Short] {
            let sequence = NoiseSequence::generate(mode);
            assert_eq!(sequence.changes()[0].step, 0);
            assert!(
                sequence
                    .changes()
                    .windows(2)
                    .all(|pair| pair[0].level != pair[1].level && pair[0].step < pair[1].step)
            );
            assert!(sequence.changes().iter().all(|c| (c.step as usize) < mode.steps()));
        }
    }

    #[test]
    fn level_lookup_wraps() {
        let sequence = NoiseSequence::generate(NoiseMode::Short);
        for step in 0..sequence.steps() {
            assert_eq!(sequence.level_at(step), sequence.level_at(step + sequence.steps()));
        }
    }
}
