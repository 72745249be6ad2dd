use serde::Serialize;
use std::fmt;

/// One page of the registration wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Step {
    Basic = 1,
    Professional = 2,
    Skills = 3,
    Preferences = 4,
    Resume = 5,
}

impl Step {
    pub const FIRST: Step = Step::Basic;
    pub const LAST: Step = Step::Resume;
    pub const COUNT: u8 = 5;

    pub const ALL: [Step; 5] = [
        Step::Basic,
        Step::Professional,
        Step::Skills,
        Step::Preferences,
        Step::Resume,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Step> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// The following step, clamped at the last one.
    pub fn next(self) -> Step {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    /// The preceding step, clamped at the first one.
    pub fn previous(self) -> Step {
        Self::from_number(self.number() - 1).unwrap_or(Self::FIRST)
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Basic => "Basic",
            Step::Professional => "Professional",
            Step::Skills => "Skills",
            Step::Preferences => "Preferences",
            Step::Resume => "Resume",
        }
    }

    /// Fraction of the progress bar filled, 0.0 on the first step and 1.0 on
    /// the last.
    pub fn progress(self) -> f32 {
        f32::from(self.number() - 1) / f32::from(Self::COUNT - 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.number(), Self::COUNT, self.label())
    }
}
