use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The fixed, ordered editing wizard.
///
/// Serialized as its zero-based index so persisted documents keep a plain
/// `currentStep` number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    #[default]
    PersonalInfo,
    Experience,
    Education,
    Skills,
    Summary,
    Projects,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::PersonalInfo,
        Step::Experience,
        Step::Education,
        Step::Skills,
        Step::Summary,
        Step::Projects,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    /// Exact lookup; `None` outside `[0, COUNT)`.
    pub fn from_index(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    /// Lookup that pins out-of-range indices to the nearest valid step.
    pub fn clamped(index: i64) -> Step {
        let last = (Self::COUNT - 1) as i64;
        Self::ALL[index.clamp(0, last) as usize]
    }

    pub fn first() -> Step {
        Step::PersonalInfo
    }

    pub fn last() -> Step {
        Step::Projects
    }

    pub fn is_last(self) -> bool {
        self == Self::last()
    }

    pub fn next(self) -> Option<Step> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal Info",
            Step::Experience => "Experience",
            Step::Education => "Education",
            Step::Skills => "Skills",
            Step::Summary => "Summary",
            Step::Projects => "Projects",
        }
    }

    /// 1-based position, as shown in "Step 2 of 6".
    pub fn position(self) -> usize {
        self.index() + 1
    }

    pub fn progress(self) -> f64 {
        self.position() as f64 / Self::COUNT as f64
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index() as u64)
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(Step::clamped(raw))
    }
}
