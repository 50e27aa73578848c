use std::fmt;

/// Errors surfaced at the boundary of this crate: malformed input, not
/// broken invariants. Invariant violations are `debug_assert!`s instead —
/// see the Configuration and Grid modules.
#[derive(Debug)]
pub enum Error {
    /// A grid-file token failed to parse as the expected integer.
    Parse(String),

    /// Exactly one of start/end was present in the input grid.
    UnbalancedEndpoints,

    /// The grid has more cells than the `u8` index type can address.
    TooManyCells { rows: usize, cols: usize },

    /// A character outside `'0'..='9'` appeared in a Configuration's
    /// canonical string form.
    InvalidDigit(char),

    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "failed to parse grid: {msg}"),
            Self::UnbalancedEndpoints => {
                write!(f, "grid has exactly one of start/end, expected both or neither")
            }
            Self::TooManyCells { rows, cols } => write!(
                f,
                "grid is {rows}x{cols} ({} cells), which exceeds the 255-cell limit",
                rows * cols
            ),
            Self::InvalidDigit(c) => {
                write!(f, "invalid configuration digit '{c}'")
            }
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
