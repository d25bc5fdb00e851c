use std::{fmt, ops::Not};

/// A propositional variable, the magnitude of a literal.
pub type Var = u32;

/// A nonzero signed integer: the magnitude names the variable, the sign its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(i32);

impl Lit {
    pub fn new(value: i32) -> Option<Lit> {
        match value {
            0 | i32::MIN => None,
            _ => Some(Lit(value)),
        }
    }

    pub fn from_dimacs(value: i32) -> Lit {
        Lit::new(value).unwrap_or_else(|| panic!("{} is not a literal", value))
    }

    pub fn var(self) -> Var {
        self.0.unsigned_abs()
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    /// The literal of `var` that is true when `var` takes `value`.
    pub fn with_value(var: Var, value: bool) -> Lit {
        let lit = Lit::from_dimacs(var as i32);
        if value {
            lit
        } else {
            !lit
        }
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Self::Output {
        Lit(-self.0)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
