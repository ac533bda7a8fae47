use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{COLS, board::ColumnHeights, placement::Placement};

/// Upper bound on the number of legal placements for a single piece.
///
/// Reached by the L, J and T pieces: 9 + 8 + 9 + 8 placements over four rotations.
pub const MAX_LEGAL_MOVES: usize = 34;

/// Legal placements for one piece kind, in rotation-major order.
pub type LegalMoves = ArrayVec<Placement, MAX_LEGAL_MOVES>;

/// Enum representing the type of piece.
///
/// The discriminant is the index into [`PieceTables`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// O-piece.
    O = 0,
    /// I-piece.
    I = 1,
    /// L-piece.
    L = 2,
    /// J-piece.
    J = 3,
    /// T-piece.
    T = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in table order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use plummet_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::O => 'O',
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use plummet_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'O' => Some(PieceKind::O),
            'I' => Some(PieceKind::I),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece kind {input:?}, expected one of O, I, L, J, T, S, Z")]
pub struct ParsePieceKindError {
    input: String,
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c.to_ascii_uppercase()),
            _ => None,
        };
        kind.ok_or_else(|| ParsePieceKindError {
            input: s.to_owned(),
        })
    }
}

/// Geometry of one piece kind in one rotation.
///
/// For every column the piece covers (left to right), `bottom` is the lowest row the
/// piece occupies in that column and `top` is one above the highest, both relative to
/// the row the piece rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceOrientation {
    width: usize,
    height: usize,
    bottom: [usize; 4],
    top: [usize; 4],
}

impl PieceOrientation {
    const fn new<const W: usize>(bottom: [usize; W], top: [usize; W]) -> Self {
        assert!(W >= 1);
        assert!(W <= 4);
        let mut padded_bottom = [0; 4];
        let mut padded_top = [0; 4];
        let mut height = 0;
        let mut i = 0;
        while i < W {
            assert!(bottom[i] < top[i]);
            padded_bottom[i] = bottom[i];
            padded_top[i] = top[i];
            if top[i] > height {
                height = top[i];
            }
            i += 1;
        }
        Self {
            width: W,
            height,
            bottom: padded_bottom,
            top: padded_top,
        }
    }

    /// Number of columns this orientation covers.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows this orientation covers.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn bottom(&self) -> &[usize] {
        &self.bottom[..self.width]
    }

    #[must_use]
    pub fn top(&self) -> &[usize] {
        &self.top[..self.width]
    }

    /// Returns the row the piece comes to rest on when dropped with its leftmost
    /// cell in `column`.
    ///
    /// Each covered column constrains the piece to rest at or above
    /// `column height - bottom offset`; the rigid piece rests at the highest of those.
    /// Every orientation has a column with a zero bottom offset, so clamping negative
    /// constraints to zero never changes the maximum.
    ///
    /// # Panics
    ///
    /// Panics if the piece would extend past the right edge of the board.
    #[must_use]
    pub fn landing_row(&self, heights: &ColumnHeights, column: usize) -> usize {
        assert!(column + self.width <= COLS);
        heights.as_array()[column..column + self.width]
            .iter()
            .zip(self.bottom())
            .map(|(height, bottom)| height.saturating_sub(*bottom))
            .max()
            .unwrap_or(0)
    }

    /// Returns whether a piece resting on `landing_row` stays below the top row.
    #[must_use]
    pub const fn fits_at(&self, landing_row: usize) -> bool {
        landing_row + self.height < super::ROWS
    }
}

/// Static geometry tables for every piece kind and rotation.
///
/// Tables are immutable and shared read-only by every game and every evaluation;
/// use [`PieceTables::STANDARD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTables {
    orientations: [&'static [PieceOrientation]; PieceKind::LEN],
}

const fn o<const W: usize>(bottom: [usize; W], top: [usize; W]) -> PieceOrientation {
    PieceOrientation::new(bottom, top)
}

const O_ORIENTATIONS: &[PieceOrientation] = &[o([0, 0], [2, 2])];
const I_ORIENTATIONS: &[PieceOrientation] = &[o([0], [4]), o([0, 0, 0, 0], [1, 1, 1, 1])];
const L_ORIENTATIONS: &[PieceOrientation] = &[
    o([0, 0], [3, 1]),
    o([0, 1, 1], [2, 2, 2]),
    o([2, 0], [3, 3]),
    o([0, 0, 0], [1, 1, 2]),
];
const J_ORIENTATIONS: &[PieceOrientation] = &[
    o([0, 0], [1, 3]),
    o([0, 0, 0], [2, 1, 1]),
    o([0, 2], [3, 3]),
    o([1, 1, 0], [2, 2, 2]),
];
const T_ORIENTATIONS: &[PieceOrientation] = &[
    o([0, 1], [3, 2]),
    o([1, 0, 1], [2, 2, 2]),
    o([1, 0], [2, 3]),
    o([0, 0, 0], [1, 2, 1]),
];
const S_ORIENTATIONS: &[PieceOrientation] = &[o([0, 0, 1], [1, 2, 2]), o([1, 0], [3, 2])];
const Z_ORIENTATIONS: &[PieceOrientation] = &[o([1, 0, 0], [2, 2, 1]), o([0, 1], [2, 3])];

impl PieceTables {
    pub const STANDARD: Self = Self {
        orientations: [
            O_ORIENTATIONS,
            I_ORIENTATIONS,
            L_ORIENTATIONS,
            J_ORIENTATIONS,
            T_ORIENTATIONS,
            S_ORIENTATIONS,
            Z_ORIENTATIONS,
        ],
    };

    #[must_use]
    pub fn orientations(&self, kind: PieceKind) -> &'static [PieceOrientation] {
        self.orientations[kind.index()]
    }

    #[must_use]
    pub fn rotation_count(&self, kind: PieceKind) -> usize {
        self.orientations(kind).len()
    }

    /// Returns the geometry of `kind` in the given rotation.
    ///
    /// # Panics
    ///
    /// Panics if `rotation` is not a valid rotation index for `kind`.
    #[must_use]
    pub fn orientation(&self, kind: PieceKind, rotation: usize) -> &'static PieceOrientation {
        &self.orientations(kind)[rotation]
    }

    /// Enumerates every placement of `kind` that keeps the piece inside the board
    /// horizontally.
    ///
    /// Placements are ordered by rotation, then by column. The set depends only on
    /// the piece geometry, never on the board contents.
    ///
    /// # Example
    ///
    /// ```
    /// use plummet_engine::{PieceKind, PieceTables};
    ///
    /// let moves = PieceTables::STANDARD.legal_moves(PieceKind::O);
    /// assert_eq!(moves.len(), 9);
    /// ```
    #[must_use]
    pub fn legal_moves(&self, kind: PieceKind) -> LegalMoves {
        self.orientations(kind)
            .iter()
            .enumerate()
            .flat_map(|(rotation, orientation)| {
                (0..=COLS - orientation.width()).map(move |column| Placement::new(rotation, column))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_counts() {
        let tables = PieceTables::STANDARD;
        let counts = PieceKind::ALL.map(|kind| tables.rotation_count(kind));
        assert_eq!(counts, [1, 2, 4, 4, 4, 2, 2]);
    }

    #[test]
    fn test_orientation_bounds() {
        let tables = PieceTables::STANDARD;
        for kind in PieceKind::ALL {
            for orientation in tables.orientations(kind) {
                assert_eq!(orientation.bottom().len(), orientation.width());
                assert_eq!(orientation.top().len(), orientation.width());
                assert_eq!(orientation.bottom().iter().min(), Some(&0), "{kind}");
                assert_eq!(
                    orientation.top().iter().max(),
                    Some(&orientation.height()),
                    "{kind}"
                );
            }
        }
    }

    #[test]
    fn test_every_orientation_has_four_cells() {
        let tables = PieceTables::STANDARD;
        for kind in PieceKind::ALL {
            for orientation in tables.orientations(kind) {
                let cells: usize = orientation
                    .bottom()
                    .iter()
                    .zip(orientation.top())
                    .map(|(b, t)| t - b)
                    .sum();
                assert_eq!(cells, 4, "{kind} has {cells} cells");
            }
        }
    }

    #[test]
    fn test_legal_move_counts() {
        let tables = PieceTables::STANDARD;
        let counts = PieceKind::ALL.map(|kind| tables.legal_moves(kind).len());
        assert_eq!(counts, [9, 17, 34, 34, 34, 17, 17]);
        assert!(counts.iter().all(|&n| n <= MAX_LEGAL_MOVES));
    }

    #[test]
    fn test_legal_moves_order() {
        let moves = PieceTables::STANDARD.legal_moves(PieceKind::I);
        assert_eq!(moves[0], Placement::new(0, 0));
        assert_eq!(moves[9], Placement::new(0, 9));
        assert_eq!(moves[10], Placement::new(1, 0));
        assert_eq!(moves[16], Placement::new(1, 6));
    }

    #[test]
    fn test_landing_row_on_flat_ground() {
        let tables = PieceTables::STANDARD;
        let heights = ColumnHeights::new([2; COLS]);
        // T pointing down: the middle column reaches one row lower than its neighbours
        let t_down = tables.orientation(PieceKind::T, 1);
        assert_eq!(t_down.landing_row(&heights, 3), 2);
        assert_eq!(t_down.landing_row(&ColumnHeights::ZERO, 3), 0);
    }

    #[test]
    fn test_landing_row_highest_column_wins() {
        let tables = PieceTables::STANDARD;
        let mut heights = [0; COLS];
        heights[4] = 5;
        let heights = ColumnHeights::new(heights);
        let i_flat = tables.orientation(PieceKind::I, 1);
        assert_eq!(i_flat.landing_row(&heights, 1), 5);
        assert_eq!(i_flat.landing_row(&heights, 5), 0);
    }

    #[test]
    fn test_fits_at() {
        let i_up = PieceTables::STANDARD.orientation(PieceKind::I, 0);
        assert!(i_up.fits_at(crate::ROWS - 5));
        assert!(!i_up.fits_at(crate::ROWS - 4));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_piece_kind_from_str() {
        assert_eq!("t".parse::<PieceKind>(), Ok(PieceKind::T));
        assert_eq!(" Z ".parse::<PieceKind>(), Ok(PieceKind::Z));
        assert!("TT".parse::<PieceKind>().is_err());
        assert!("".parse::<PieceKind>().is_err());
        assert!("X".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_piece_kind_serialization() {
        let serialized = serde_json::to_string(&PieceKind::S).unwrap();
        assert_eq!(serialized, "\"S\"");
        let deserialized: PieceKind = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, PieceKind::S);
    }
}
