use std::collections::BTreeMap;
use std::fmt;

/// A critical-reception score on the canonical 0-100 scale, always > 0
pub type Score = f64;

/// Canonical per-source ratings for one title. Keyed by the closed
/// [`SourceCode`] set, so a title carries at most one score per source.
pub type CanonicalRatings = BTreeMap<SourceCode, Score>;

/// Closed set of rating sources known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceCode {
    /// IMDb
    IM,
    /// Rotten Tomatoes critics (Tomatometer)
    RT,
    /// Rotten Tomatoes audience (Popcornmeter)
    PC,
    /// Metacritic critics (Metascore)
    MC,
    /// Letterboxd
    LB,
    /// Trakt
    TR,
    /// TMDB community score
    TM,
}

impl SourceCode {
    /// Registry label, also the wire value for rating submissions
    pub fn label(&self) -> &'static str {
        match self {
            SourceCode::IM => "IM",
            SourceCode::RT => "RT",
            SourceCode::PC => "PC",
            SourceCode::MC => "MC",
            SourceCode::LB => "LB",
            SourceCode::TR => "TR",
            SourceCode::TM => "TM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SourceCode::IM => "IMDb",
            SourceCode::RT => "Rotten Tomatoes",
            SourceCode::PC => "Popcornmeter",
            SourceCode::MC => "Metacritic",
            SourceCode::LB => "Letterboxd",
            SourceCode::TR => "Trakt",
            SourceCode::TM => "TMDB",
        }
    }
}

impl fmt::Display for SourceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
