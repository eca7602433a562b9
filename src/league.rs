use std::fmt;

/// Leagues served as calendar feeds. Each carries its static upstream and calendar settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    Nfl,
    Nba,
}

impl League {
    pub const ALL: [League; 2] = [League::Nfl, League::Nba];

    /// Short code used both as the upstream league path segment and the feed file name.
    pub fn code(self) -> &'static str {
        match self {
            League::Nfl => "nfl",
            League::Nba => "nba",
        }
    }

    pub fn sport_path(self) -> &'static str {
        match self {
            League::Nfl => "football",
            League::Nba => "basketball",
        }
    }

    /// Approximate game length used for DTEND.
    pub fn default_hours(self) -> f64 {
        match self {
            League::Nfl => 3.0,
            League::Nba => 2.5,
        }
    }

    pub fn prodid(self) -> &'static str {
        match self {
            League::Nfl => "-//Homepage Sports Calendar//NFL//EN",
            League::Nba => "-//Homepage Sports Calendar//NBA//EN",
        }
    }

    pub fn uid_prefix(self) -> &'static str {
        self.code()
    }

    /// Route path for this league's feed, e.g. `/nfl.ics`.
    pub fn feed_path(self) -> String {
        format!("/{}.ics", self.code())
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_ascii_uppercase())
    }
}
