/// Feedback tier for an adjusted reaction time.
///
/// Tiers are ordered fastest to slowest; each has a strict upper bound and
/// the first bound the time falls under wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum_macros::Display)]
pub enum Tier {
    #[strum(serialize = "God Level")]
    GodLevel,
    #[strum(serialize = "Pretty Good")]
    PrettyGood,
    #[strum(serialize = "Good")]
    Good,
    #[strum(serialize = "Fine ig...")]
    Fine,
    #[strum(serialize = "Ugh")]
    Ugh,
    #[strum(serialize = "Bruh Slow")]
    BruhSlow,
    #[strum(serialize = "So Slow omg")]
    SoSlow,
    #[strum(serialize = "Its not for you")]
    NotForYou,
}

const BOUNDS: [(u64, Tier); 7] = [
    (70, Tier::GodLevel),
    (100, Tier::PrettyGood),
    (200, Tier::Good),
    (300, Tier::Fine),
    (400, Tier::Ugh),
    (500, Tier::BruhSlow),
    (600, Tier::SoSlow),
];

impl Tier {
    pub const ALL: [Tier; 8] = [
        Tier::GodLevel,
        Tier::PrettyGood,
        Tier::Good,
        Tier::Fine,
        Tier::Ugh,
        Tier::BruhSlow,
        Tier::SoSlow,
        Tier::NotForYou,
    ];

    pub fn classify(ms: u64) -> Tier {
        BOUNDS
            .iter()
            .find(|(bound, _)| ms < *bound)
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::NotForYou)
    }

    /// Exclusive upper bound in milliseconds, `None` for the last tier
    pub fn upper_bound(&self) -> Option<u64> {
        BOUNDS.iter().find(|(_, t)| t == self).map(|(b, _)| *b)
    }

    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Tier::GodLevel => "💀",
            Tier::PrettyGood => "😲",
            Tier::Good => "😏",
            Tier::Fine => "🤗",
            Tier::Ugh => "😒",
            Tier::BruhSlow => "🙄",
            Tier::SoSlow => "🤨",
            Tier::NotForYou => "🤢",
        }
    }
}
