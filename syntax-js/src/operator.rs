use ahash::HashMap;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  // Only used for the precedence of the alternate branch of a conditional; never appears in AST.
  ConditionalAlternate,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  NullishCoalescing,
  OptionalChainingCall,
  OptionalChainingComputedMemberAccess,
  OptionalChainingMemberAccess,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    self.compound_binary().is_some() || self == OperatorName::Assignment
  }

  /// The data operation a compound assignment applies to the current value and the right-hand
  /// side before writing back. Logical compounds short-circuit and are special-cased by the
  /// evaluator.
  pub fn compound_binary(self) -> Option<OperatorName> {
    use OperatorName::*;
    Some(match self {
      AssignmentAddition => Addition,
      AssignmentBitwiseAnd => BitwiseAnd,
      AssignmentBitwiseLeftShift => BitwiseLeftShift,
      AssignmentBitwiseOr => BitwiseOr,
      AssignmentBitwiseRightShift => BitwiseRightShift,
      AssignmentBitwiseUnsignedRightShift => BitwiseUnsignedRightShift,
      AssignmentBitwiseXor => BitwiseXor,
      AssignmentDivision => Division,
      AssignmentExponentiation => Exponentiation,
      AssignmentLogicalAnd => LogicalAnd,
      AssignmentLogicalOr => LogicalOr,
      AssignmentMultiplication => Multiplication,
      AssignmentNullishCoalescing => NullishCoalescing,
      AssignmentRemainder => Remainder,
      AssignmentSubtraction => Subtraction,
      _ => return None,
    })
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Copy, Clone, Debug)]
pub struct Operator {
  pub name: OperatorName,
  pub associativity: Associativity,
  pub precedence: u8,
}

fn op(name: OperatorName, associativity: Associativity, precedence: u8) -> (OperatorName, Operator) {
  (name, Operator {
    name,
    associativity,
    precedence,
  })
}

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  [
    op(Comma, Left, 1),
    op(Yield, Right, 2),
    op(Assignment, Right, 3),
    op(AssignmentAddition, Right, 3),
    op(AssignmentBitwiseAnd, Right, 3),
    op(AssignmentBitwiseLeftShift, Right, 3),
    op(AssignmentBitwiseOr, Right, 3),
    op(AssignmentBitwiseRightShift, Right, 3),
    op(AssignmentBitwiseUnsignedRightShift, Right, 3),
    op(AssignmentBitwiseXor, Right, 3),
    op(AssignmentDivision, Right, 3),
    op(AssignmentExponentiation, Right, 3),
    op(AssignmentLogicalAnd, Right, 3),
    op(AssignmentLogicalOr, Right, 3),
    op(AssignmentMultiplication, Right, 3),
    op(AssignmentNullishCoalescing, Right, 3),
    op(AssignmentRemainder, Right, 3),
    op(AssignmentSubtraction, Right, 3),
    op(ConditionalAlternate, Right, 3),
    op(Conditional, Right, 4),
    op(NullishCoalescing, Left, 5),
    op(LogicalOr, Left, 6),
    op(LogicalAnd, Left, 7),
    op(BitwiseOr, Left, 8),
    op(BitwiseXor, Left, 9),
    op(BitwiseAnd, Left, 10),
    op(Equality, Left, 11),
    op(Inequality, Left, 11),
    op(StrictEquality, Left, 11),
    op(StrictInequality, Left, 11),
    op(GreaterThan, Left, 12),
    op(GreaterThanOrEqual, Left, 12),
    op(In, Left, 12),
    op(Instanceof, Left, 12),
    op(LessThan, Left, 12),
    op(LessThanOrEqual, Left, 12),
    op(BitwiseLeftShift, Left, 13),
    op(BitwiseRightShift, Left, 13),
    op(BitwiseUnsignedRightShift, Left, 13),
    op(Addition, Left, 14),
    op(Subtraction, Left, 14),
    op(Division, Left, 15),
    op(Multiplication, Left, 15),
    op(Remainder, Left, 15),
    op(Exponentiation, Right, 16),
    op(Await, Right, 17),
    op(BitwiseNot, Right, 17),
    op(Delete, Right, 17),
    op(LogicalNot, Right, 17),
    op(PrefixDecrement, Right, 17),
    op(PrefixIncrement, Right, 17),
    op(Typeof, Right, 17),
    op(UnaryNegation, Right, 17),
    op(UnaryPlus, Right, 17),
    op(Void, Right, 17),
    op(PostfixDecrement, Left, 18),
    op(PostfixIncrement, Left, 18),
    op(New, Right, 19),
    op(Call, Left, 20),
    op(ComputedMemberAccess, Left, 20),
    op(MemberAccess, Left, 20),
    op(OptionalChainingCall, Left, 20),
    op(OptionalChainingComputedMemberAccess, Left, 20),
    op(OptionalChainingMemberAccess, Left, 20),
  ]
  .into_iter()
  .collect()
});
