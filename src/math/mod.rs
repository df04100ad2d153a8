//! Homogeneous vectors and 4x4 matrices.

pub mod mat4;
pub mod vec4;

/// Errors raised by the strict constructors. The lenient constructors
/// (`Mat4::from_slice`, `Mat4::rotation_for`, `Vec4::from_slice`) log and fall
/// back to zero instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("expected {expected} components, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unknown rotation axis {0:?}")]
    UnknownAxis(char),
}

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl TryFrom<char> for Axis {
    type Error = MathError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'x' => Ok(Axis::X),
            'y' => Ok(Axis::Y),
            'z' => Ok(Axis::Z),
            other => Err(MathError::UnknownAxis(other)),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_parses_lowercase_only() {
        assert_eq!(Axis::try_from('y'), Ok(Axis::Y));
        assert_eq!(Axis::try_from('Y'), Err(MathError::UnknownAxis('Y')));
    }
}
