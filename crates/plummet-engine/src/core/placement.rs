use serde::{Deserialize, Serialize};

/// One way to place the current piece: a rotation index and the leftmost column the
/// piece covers.
///
/// Serialized as `{"rotation": r, "column": c}` and displayed as `r<rotation>@c<column>`.
///
/// # Example
///
/// ```
/// use plummet_engine::Placement;
///
/// let placement = Placement::new(1, 4);
/// assert_eq!(placement.to_string(), "r1@c4");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("r{rotation}@c{column}")]
pub struct Placement {
    rotation: usize,
    column: usize,
}

impl Placement {
    #[must_use]
    pub const fn new(rotation: usize, column: usize) -> Self {
        Self { rotation, column }
    }

    #[must_use]
    pub const fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}
