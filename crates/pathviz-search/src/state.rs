/// What a board cell currently is, as far as editing and searching go.
///
/// Display colours are derived from this tag by the presentation layer,
/// never the other way round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Discovered by a search, not yet expanded.
    Open,
    /// Expanded by a search.
    Closed,
    /// On the reconstructed path.
    Path,
}

impl CellState {
    pub const ALL: [CellState; 7] = [
        Self::Empty,
        Self::Barrier,
        Self::Start,
        Self::End,
        Self::Open,
        Self::Closed,
        Self::Path,
    ];

    /// Whether this mark was left by a search run rather than by editing.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// Character used by the text board format.
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Barrier => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Path => '*',
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    pub fn from_char(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.to_char() == ch)
    }
}
