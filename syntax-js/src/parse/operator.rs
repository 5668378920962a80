use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::token::TT;
use ahash::HashMap;
use once_cell::sync::Lazy;

#[rustfmt::skip]
pub static MULTARY_OPERATOR_MAPPING: Lazy<HashMap<TT, &'static Operator>> = Lazy::new(|| {
  [
    (TT::Plus, OperatorName::Addition),
    (TT::Equals, OperatorName::Assignment),
    (TT::PlusEquals, OperatorName::AssignmentAddition),
    (TT::AmpersandEquals, OperatorName::AssignmentBitwiseAnd),
    (TT::ChevronLeftChevronLeftEquals, OperatorName::AssignmentBitwiseLeftShift),
    (TT::BarEquals, OperatorName::AssignmentBitwiseOr),
    (TT::ChevronRightChevronRightEquals, OperatorName::AssignmentBitwiseRightShift),
    (TT::ChevronRightChevronRightChevronRightEquals, OperatorName::AssignmentBitwiseUnsignedRightShift),
    (TT::CaretEquals, OperatorName::AssignmentBitwiseXor),
    (TT::SlashEquals, OperatorName::AssignmentDivision),
    (TT::AsteriskAsteriskEquals, OperatorName::AssignmentExponentiation),
    (TT::AmpersandAmpersandEquals, OperatorName::AssignmentLogicalAnd),
    (TT::BarBarEquals, OperatorName::AssignmentLogicalOr),
    (TT::AsteriskEquals, OperatorName::AssignmentMultiplication),
    (TT::QuestionQuestionEquals, OperatorName::AssignmentNullishCoalescing),
    (TT::PercentEquals, OperatorName::AssignmentRemainder),
    (TT::HyphenEquals, OperatorName::AssignmentSubtraction),
    (TT::Ampersand, OperatorName::BitwiseAnd),
    (TT::ChevronLeftChevronLeft, OperatorName::BitwiseLeftShift),
    (TT::Bar, OperatorName::BitwiseOr),
    (TT::ChevronRightChevronRight, OperatorName::BitwiseRightShift),
    (TT::ChevronRightChevronRightChevronRight, OperatorName::BitwiseUnsignedRightShift),
    (TT::Caret, OperatorName::BitwiseXor),
    (TT::ParenthesisOpen, OperatorName::Call),
    (TT::Comma, OperatorName::Comma),
    (TT::BracketOpen, OperatorName::ComputedMemberAccess),
    (TT::Question, OperatorName::Conditional),
    (TT::Slash, OperatorName::Division),
    (TT::EqualsEquals, OperatorName::Equality),
    (TT::AsteriskAsterisk, OperatorName::Exponentiation),
    (TT::ChevronRight, OperatorName::GreaterThan),
    (TT::ChevronRightEquals, OperatorName::GreaterThanOrEqual),
    (TT::KeywordIn, OperatorName::In),
    (TT::ExclamationEquals, OperatorName::Inequality),
    (TT::KeywordInstanceof, OperatorName::Instanceof),
    (TT::ChevronLeft, OperatorName::LessThan),
    (TT::ChevronLeftEquals, OperatorName::LessThanOrEqual),
    (TT::AmpersandAmpersand, OperatorName::LogicalAnd),
    (TT::BarBar, OperatorName::LogicalOr),
    (TT::Dot, OperatorName::MemberAccess),
    (TT::Asterisk, OperatorName::Multiplication),
    (TT::QuestionQuestion, OperatorName::NullishCoalescing),
    (TT::QuestionDot, OperatorName::OptionalChainingMemberAccess),
    (TT::QuestionDotBracketOpen, OperatorName::OptionalChainingComputedMemberAccess),
    (TT::QuestionDotParenthesisOpen, OperatorName::OptionalChainingCall),
    (TT::Percent, OperatorName::Remainder),
    (TT::EqualsEqualsEquals, OperatorName::StrictEquality),
    (TT::ExclamationEqualsEquals, OperatorName::StrictInequality),
    (TT::Hyphen, OperatorName::Subtraction),
  ]
  .into_iter()
  .map(|(tt, name)| (tt, &OPERATORS[&name]))
  .collect()
});

#[rustfmt::skip]
pub static UNARY_OPERATOR_MAPPING: Lazy<HashMap<TT, &'static Operator>> = Lazy::new(|| {
  // Postfix{Increment,Decrement} and New omitted and handled manually: postfix operators obey
  // an ASI restriction, and `new`'s argument list binds before any call suffix.
  [
    (TT::KeywordAwait, OperatorName::Await),
    (TT::Tilde, OperatorName::BitwiseNot),
    (TT::KeywordDelete, OperatorName::Delete),
    (TT::Exclamation, OperatorName::LogicalNot),
    (TT::HyphenHyphen, OperatorName::PrefixDecrement),
    (TT::PlusPlus, OperatorName::PrefixIncrement),
    (TT::Hyphen, OperatorName::UnaryNegation),
    (TT::Plus, OperatorName::UnaryPlus),
    (TT::KeywordTypeof, OperatorName::Typeof),
    (TT::KeywordVoid, OperatorName::Void),
    (TT::KeywordYield, OperatorName::Yield),
  ]
  .into_iter()
  .map(|(tt, name)| (tt, &OPERATORS[&name]))
  .collect()
});
