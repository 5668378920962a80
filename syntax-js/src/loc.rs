use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A half-open UTF-8 byte range within the source text.
///
/// Synthesised nodes may carry an approximate/best-effort location; a `Loc` is a span annotation,
/// not a guarantee that the node's text appears verbatim at that range.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  /// Create an error at this location.
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Loc) -> Loc {
    Loc(min(self.0, rhs.0), max(self.1, rhs.1))
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Loc) {
    self.extend(rhs);
  }
}
