// SPDX-License-Identifier: MIT

//! Interval-walking program phase generation.
//!
//! Every program expands to `[warmup, (fast, slow) × n, cooldown]` with
//! contiguous offsets: each phase starts exactly where the previous one
//! ended, no gaps, no overlaps.

use serde::{Deserialize, Serialize};

/// Phase type within a guided walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Warmup,
    Fast,
    Slow,
    Cooldown,
}

/// One contiguous stretch of a guided walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    /// Seconds from session start.
    pub start_offset_secs: u32,
    pub duration_secs: u32,
}

/// A guided interval-walking program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalProgram {
    pub name: String,
    pub interval_count: u32,
    pub warmup_minutes: u32,
    pub fast_minutes: u32,
    pub slow_minutes: u32,
    pub cooldown_minutes: u32,
}

impl IntervalProgram {
    /// Expand the program into its ordered phase sequence.
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = Vec::with_capacity(2 + 2 * self.interval_count as usize);
        let mut offset = 0u32;
        let mut push = |kind: PhaseKind, duration_secs: u32| {
            phases.push(Phase {
                kind,
                start_offset_secs: offset,
                duration_secs,
            });
            offset += duration_secs;
        };

        push(PhaseKind::Warmup, self.warmup_minutes * 60);
        for _ in 0..self.interval_count {
            push(PhaseKind::Fast, self.fast_minutes * 60);
            push(PhaseKind::Slow, self.slow_minutes * 60);
        }
        push(PhaseKind::Cooldown, self.cooldown_minutes * 60);

        phases
    }

    pub fn total_duration_secs(&self) -> u32 {
        (self.warmup_minutes
            + self.interval_count * (self.fast_minutes + self.slow_minutes)
            + self.cooldown_minutes)
            * 60
    }
}

/// Built-in programs offered by the app.
pub fn preset_programs() -> Vec<IntervalProgram> {
    vec![
        // The classic Japanese interval-walking protocol
        IntervalProgram {
            name: "Classic Interval Walk".to_string(),
            interval_count: 5,
            warmup_minutes: 5,
            fast_minutes: 3,
            slow_minutes: 3,
            cooldown_minutes: 5,
        },
        IntervalProgram {
            name: "First Steps".to_string(),
            interval_count: 3,
            warmup_minutes: 3,
            fast_minutes: 1,
            slow_minutes: 2,
            cooldown_minutes: 3,
        },
        IntervalProgram {
            name: "Endurance Builder".to_string(),
            interval_count: 8,
            warmup_minutes: 5,
            fast_minutes: 3,
            slow_minutes: 2,
            cooldown_minutes: 5,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_program_shape() {
        let program = &preset_programs()[0];
        let phases = program.phases();

        assert_eq!(phases.len(), 12);
        assert_eq!(phases[0].kind, PhaseKind::Warmup);
        assert_eq!(phases[0].start_offset_secs, 0);
        assert_eq!(phases[1].kind, PhaseKind::Fast);
        assert_eq!(phases[1].start_offset_secs, 300);
        assert_eq!(phases.last().expect("phases").kind, PhaseKind::Cooldown);
    }

    #[test]
    fn test_total_duration_matches_phases() {
        for program in preset_programs() {
            let phases = program.phases();
            let last = phases.last().expect("phases");
            assert_eq!(
                last.start_offset_secs + last.duration_secs,
                program.total_duration_secs(),
                "program {}",
                program.name
            );
        }
    }

    #[test]
    fn test_zero_intervals_still_bracketed() {
        let program = IntervalProgram {
            name: "Recovery Stroll".to_string(),
            interval_count: 0,
            warmup_minutes: 5,
            fast_minutes: 3,
            slow_minutes: 3,
            cooldown_minutes: 5,
        };
        let phases = program.phases();

        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].kind, PhaseKind::Warmup);
        assert_eq!(phases[1].kind, PhaseKind::Cooldown);
        assert_eq!(phases[1].start_offset_secs, 300);
    }
}
