use super::Parser;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::LitTemplateExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::char::is_line_terminator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::num::JsNumber;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::parse::operator::MULTARY_OPERATOR_MAPPING;
use crate::parse::operator::UNARY_OPERATOR_MAPPING;
use crate::token::is_valid_binding_identifier;
use crate::token::is_valid_member_name;
use crate::token::TT;

pub struct Asi {
  pub can_end_with_asi: bool,
  pub did_end_with_asi: bool,
}

impl Asi {
  pub fn can() -> Asi {
    Asi {
      can_end_with_asi: true,
      did_end_with_asi: false,
    }
  }

  pub fn no() -> Asi {
    Asi {
      can_end_with_asi: false,
      did_end_with_asi: false,
    }
  }
}

impl<'a> Parser<'a> {
  pub fn call_args(&mut self) -> SyntaxResult<Vec<Node<CallArg>>> {
    let mut args = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      let arg = self.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr([TT::Comma, TT::ParenthesisClose])?;
        Ok(CallArg { spread, value })
      })?;
      args.push(arg);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      };
    }
    Ok(args)
  }

  pub fn expr<const N: usize>(&mut self, terminators: [TT; N]) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(1, terminators, &mut Asi::no())
  }

  pub fn expr_with_asi<const N: usize>(
    &mut self,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(1, terminators, asi)
  }

  /// Parses a parenthesised expression like `(a + b)`.
  pub fn grouping(&mut self) -> SyntaxResult<Node<Expr>> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr_with_min_prec(1, [TT::ParenthesisClose], &mut Asi::no())?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  pub fn arrow_func_expr<const N: usize>(
    &mut self,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<ArrowFuncExpr>> {
    let func = self.with_loc(|p| {
      // `async` is only the modifier when it isn't itself the single parameter (`async => ...`).
      let is_async = p.peek().typ == TT::KeywordAsync
        && p.peek_n::<2>()[1].typ != TT::EqualsChevronRight
        && {
          p.consume();
          true
        };

      let [t0, t1] = p.peek_n::<2>();
      let parameters = if is_valid_binding_identifier(t0.typ) && t1.typ == TT::EqualsChevronRight {
        // Single-unparenthesised-parameter arrow function.
        let name_loc = p.consume().loc;
        let pat = Node::new(name_loc, IdPat {
          name: p.string(name_loc),
        })
        .into_wrapped();
        let pattern = Node::new(name_loc, PatDecl { pat });
        vec![Node::new(name_loc, ParamDecl {
          rest: false,
          pattern,
          default_value: None,
        })]
      } else {
        p.func_params()?
      };

      let arrow = p.require(TT::EqualsChevronRight)?;
      if arrow.preceded_by_line_terminator {
        // Illegal under Automatic Semicolon Insertion rules.
        return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
      }

      let body = match p.peek().typ {
        TT::BraceOpen => p.parse_func_block_body()?.into(),
        _ => p.expr_with_asi(terminators, &mut Asi::can())?.into(),
      };
      Ok(Func {
        arrow: true,
        async_: is_async,
        generator: false,
        parameters,
        body,
      })
    })?;
    Ok(Node::new(func.loc, ArrowFuncExpr { func }))
  }

  pub fn arrow_function_or_grouping_expr<const N: usize>(
    &mut self,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    // Try and parse as arrow function signature first. If we fail, backtrack and parse as
    // grouping instead. After we see `=>`, we assume it's definitely an arrow function and do not
    // backtrack.
    let cp = self.checkpoint();
    match self.arrow_func_expr(terminators) {
      Ok(expr) => Ok(expr.into_wrapped()),
      Err(err) if err.typ == SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        Err(err)
      }
      Err(_) => {
        self.restore_checkpoint(cp);
        self.grouping()
      }
    }
  }

  pub fn func_expr(&mut self) -> SyntaxResult<Node<FuncExpr>> {
    self.with_loc(|p| {
      let is_async = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      let name = p.maybe_class_or_func_name();
      let func = p.func_signature_and_block_body(is_async, generator)?;
      Ok(FuncExpr { name, func })
    })
  }

  pub fn id_expr(&mut self) -> SyntaxResult<Node<IdExpr>> {
    let t = self.consume();
    if !is_valid_binding_identifier(t.typ) {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
    };
    let name = self.string(t.loc);
    Ok(Node::new(t.loc, IdExpr { name }))
  }

  pub fn maybe_class_or_func_name(&mut self) -> Option<Node<ClassOrFuncName>> {
    let t = self.peek();
    if !is_valid_binding_identifier(t.typ) {
      return None;
    };
    self.consume();
    Some(Node::new(t.loc, ClassOrFuncName {
      name: self.string(t.loc),
    }))
  }

  pub fn class_or_func_name(&mut self) -> SyntaxResult<Node<ClassOrFuncName>> {
    let t = self.consume();
    if !is_valid_binding_identifier(t.typ) {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("name")));
    };
    Ok(Node::new(t.loc, ClassOrFuncName {
      name: self.string(t.loc),
    }))
  }

  pub fn this_expr(&mut self) -> SyntaxResult<Node<ThisExpr>> {
    let t = self.require(TT::KeywordThis)?;
    Ok(Node::new(t.loc, ThisExpr {}))
  }

  pub fn super_expr(&mut self) -> SyntaxResult<Node<SuperExpr>> {
    let t = self.require(TT::KeywordSuper)?;
    Ok(Node::new(t.loc, SuperExpr {}))
  }

  pub fn lit_bool(&mut self) -> SyntaxResult<Node<LitBoolExpr>> {
    let t = self.consume();
    let value = match t.typ {
      TT::LiteralTrue => true,
      TT::LiteralFalse => false,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("boolean literal"))),
    };
    Ok(Node::new(t.loc, LitBoolExpr { value }))
  }

  pub fn lit_null(&mut self) -> SyntaxResult<Node<LitNullExpr>> {
    let t = self.require(TT::LiteralNull)?;
    Ok(Node::new(t.loc, LitNullExpr {}))
  }

  pub fn lit_num(&mut self) -> SyntaxResult<Node<LitNumExpr>> {
    let t = self.require(TT::LiteralNumber)?;
    let value = JsNumber::from_literal(self.str(t.loc))
      .ok_or_else(|| t.error(SyntaxErrorType::MalformedLiteralNumber))?;
    Ok(Node::new(t.loc, LitNumExpr { value }))
  }

  pub fn lit_str(&mut self) -> SyntaxResult<Node<LitStrExpr>> {
    let t = self.require(TT::LiteralString)?;
    let raw = self.str(t.loc);
    let value =
      decode_string_text(&raw[1..raw.len() - 1]).map_err(|typ| t.error(typ))?;
    Ok(Node::new(t.loc, LitStrExpr { value }))
  }

  pub fn lit_regex(&mut self) -> SyntaxResult<Node<LitRegexExpr>> {
    let t = self.require_with_mode(TT::LiteralRegex, LexMode::SlashIsRegex)?;
    let raw = self.str(t.loc);
    // The token always carries both delimiting slashes; flags follow the final one.
    let close = raw.rfind('/').unwrap();
    Ok(Node::new(t.loc, LitRegexExpr {
      pattern: raw[1..close].to_string(),
      flags: raw[close + 1..].to_string(),
    }))
  }

  pub fn lit_template(&mut self) -> SyntaxResult<Node<LitTemplateExpr>> {
    self.with_loc(|p| {
      let mut parts = Vec::new();
      let mut t = p.consume();
      loop {
        let raw = p.str(t.loc);
        let (text, has_substitution) = match t.typ {
          // Strip the leading delimiter (backtick or the `}` closing the previous substitution)
          // and the trailing `${` or closing backtick.
          TT::LiteralTemplatePartString => (&raw[1..raw.len() - 2], true),
          TT::LiteralTemplatePartStringEnd => (&raw[1..raw.len() - 1], false),
          _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("template literal"))),
        };
        parts.push(LitTemplatePart::String(
          decode_string_text(text).map_err(|typ| t.error(typ))?,
        ));
        if !has_substitution {
          break;
        }
        let substitution = p.expr([TT::BraceClose])?;
        parts.push(LitTemplatePart::Substitution(substitution));
        t = p.consume_with_mode(LexMode::TemplateStrContinue);
      }
      Ok(LitTemplateExpr { parts })
    })
  }

  pub fn lit_arr(&mut self) -> SyntaxResult<Node<LitArrExpr>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      loop {
        if p.consume_if(TT::Comma).is_match() {
          elements.push(LitArrElem::Empty);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        if p.consume_if(TT::DotDotDot).is_match() {
          elements.push(LitArrElem::Rest(p.expr([TT::Comma, TT::BracketClose])?));
        } else {
          elements.push(LitArrElem::Single(p.expr([TT::Comma, TT::BracketClose])?));
        };
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BracketClose)?;
      Ok(LitArrExpr { elements })
    })
  }

  /// Parses `new Callee(args)`. The callee may only carry member-access suffixes; the first
  /// argument list belongs to `new`, and any further call/member suffixes apply to the
  /// constructed result (handled by the caller's operator loop).
  fn new_expr<const N: usize>(
    &mut self,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordNew)?;
          let mut callee = p.expr_operand(terminators, asi)?;
          loop {
            match p.peek().typ {
              TT::Dot => {
                p.consume();
                let right = p.consume();
                if !is_valid_member_name(right.typ) {
                  return Err(right.error(SyntaxErrorType::ExpectedSyntax("member name")));
                };
                callee = Node::new(callee.loc + right.loc, MemberExpr {
                  optional_chaining: false,
                  left: callee,
                  right: p.string(right.loc),
                })
                .into_wrapped();
              }
              TT::BracketOpen => {
                p.consume();
                let member = p.expr([TT::BracketClose])?;
                let end = p.require(TT::BracketClose)?;
                callee = Node::new(callee.loc + end.loc, ComputedMemberExpr {
                  optional_chaining: false,
                  object: callee,
                  member,
                })
                .into_wrapped();
              }
              _ => break,
            }
          }
          let arguments = if p.consume_if(TT::ParenthesisOpen).is_match() {
            let arguments = p.call_args()?;
            p.require(TT::ParenthesisClose)?;
            arguments
          } else {
            Vec::new()
          };
          let loc = callee.loc;
          let call: Node<Expr> = Node::new(loc, CallExpr {
            optional_chaining: false,
            callee,
            arguments,
          })
          .into_wrapped();
          Ok(UnaryExpr {
            operator: OperatorName::New,
            argument: call,
          })
        })?
        .into_wrapped(),
    )
  }

  fn expr_operand<const N: usize>(
    &mut self,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    let [t0, t1] =
      self.peek_n_with_mode([LexMode::SlashIsRegex, LexMode::Standard]);

    if t0.typ == TT::KeywordNew {
      return self.new_expr(terminators, asi);
    };

    // Handle unary operators before the operand.
    if let Some(operator) = UNARY_OPERATOR_MAPPING.get(&t0.typ) {
      return Ok(
        self
          .with_loc(|p| {
            p.consume_with_mode(LexMode::SlashIsRegex);
            let next_min_prec =
              operator.precedence + (operator.associativity == Associativity::Left) as u8;
            let argument = p.expr_with_min_prec(next_min_prec, terminators, asi)?;
            Ok(UnaryExpr {
              operator: operator.name,
              argument,
            })
          })?
          .into_wrapped(),
      );
    };

    // Check for the `async` modifier first, before checking if it's a valid identifier.
    // Exception: `async => ...` treats `async` as the parameter name, not a modifier.
    if t0.typ == TT::KeywordAsync && t1.typ != TT::EqualsChevronRight {
      let [_, _, t2] = self.peek_n::<3>();
      return Ok(match t1.typ {
        TT::ParenthesisOpen => self.arrow_func_expr(terminators)?.into_wrapped(),
        TT::KeywordFunction => self.func_expr()?.into_wrapped(),
        // `async x => ...`
        _ if is_valid_binding_identifier(t1.typ) && t2.typ == TT::EqualsChevronRight => {
          self.arrow_func_expr(terminators)?.into_wrapped()
        }
        // `async` is being used as an identifier.
        _ => self.id_expr()?.into_wrapped(),
      });
    };

    if is_valid_binding_identifier(t0.typ) {
      return Ok(if t1.typ == TT::EqualsChevronRight {
        // Single-unparenthesised-parameter arrow function.
        self.arrow_func_expr(terminators)?.into_wrapped()
      } else {
        self.id_expr()?.into_wrapped()
      });
    };

    let expr: Node<Expr> = match t0.typ {
      TT::BracketOpen => self.lit_arr()?.into_wrapped(),
      TT::BraceOpen => self.lit_obj()?.into_wrapped(),
      TT::KeywordClass => self.class_expr()?.into_wrapped(),
      TT::KeywordFunction => self.func_expr()?.into_wrapped(),
      TT::KeywordSuper => self.super_expr()?.into_wrapped(),
      TT::KeywordThis => self.this_expr()?.into_wrapped(),
      TT::LiteralTrue | TT::LiteralFalse => self.lit_bool()?.into_wrapped(),
      TT::LiteralNull => self.lit_null()?.into_wrapped(),
      TT::LiteralNumber => self.lit_num()?.into_wrapped(),
      TT::LiteralRegex => self.lit_regex()?.into_wrapped(),
      TT::LiteralString => self.lit_str()?.into_wrapped(),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        self.lit_template()?.into_wrapped()
      }
      TT::ParenthesisOpen => self.arrow_function_or_grouping_expr(terminators)?,
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    };
    Ok(expr)
  }

  pub fn expr_with_min_prec<const N: usize>(
    &mut self,
    min_prec: u8,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    let mut left = self.expr_operand(terminators, asi)?;
    let asi_allowed = asi.can_end_with_asi;

    loop {
      let cp = self.checkpoint();
      let t = self.consume();

      if terminators.contains(&t.typ) {
        self.restore_checkpoint(cp);
        break;
      };

      // Automatic Semicolon Insertion rules: no newline between operand and postfix operator.
      if let TT::PlusPlus | TT::HyphenHyphen = t.typ {
        if !t.preceded_by_line_terminator {
          let operator_name = match t.typ {
            TT::PlusPlus => OperatorName::PostfixIncrement,
            _ => OperatorName::PostfixDecrement,
          };
          let operator = &OPERATORS[&operator_name];
          if operator.precedence < min_prec {
            self.restore_checkpoint(cp);
            break;
          };
          left = Node::new(left.loc + t.loc, UnaryPostfixExpr {
            operator: operator_name,
            argument: left,
          })
          .into_wrapped();
          continue;
        }
      }

      match MULTARY_OPERATOR_MAPPING.get(&t.typ) {
        None => {
          if t.typ == TT::Semicolon {
            self.restore_checkpoint(cp);
            break;
          };
          if asi_allowed
            && (t.preceded_by_line_terminator || t.typ == TT::BraceClose || t.typ == TT::EOF)
          {
            // Automatic Semicolon Insertion.
            self.restore_checkpoint(cp);
            asi.did_end_with_asi = true;
            break;
          };
          return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operator")));
        }
        Some(operator) => {
          if operator.precedence < min_prec {
            self.restore_checkpoint(cp);
            break;
          };

          let next_min_prec =
            operator.precedence + (operator.associativity == Associativity::Left) as u8;

          left = match operator.name {
            OperatorName::Call | OperatorName::OptionalChainingCall => {
              let arguments = self.call_args()?;
              let end = self.require(TT::ParenthesisClose)?;
              Node::new(left.loc + end.loc, CallExpr {
                optional_chaining: operator.name == OperatorName::OptionalChainingCall,
                callee: left,
                arguments,
              })
              .into_wrapped()
            }
            OperatorName::ComputedMemberAccess
            | OperatorName::OptionalChainingComputedMemberAccess => {
              let member = self.expr([TT::BracketClose])?;
              let end = self.require(TT::BracketClose)?;
              Node::new(left.loc + end.loc, ComputedMemberExpr {
                optional_chaining: operator.name
                  == OperatorName::OptionalChainingComputedMemberAccess,
                object: left,
                member,
              })
              .into_wrapped()
            }
            OperatorName::Conditional => {
              let consequent = self.expr([TT::Colon])?;
              self.require(TT::Colon)?;
              let alternate = self.expr_with_min_prec(
                OPERATORS[&OperatorName::ConditionalAlternate].precedence,
                terminators,
                asi,
              )?;
              Node::new(left.loc + alternate.loc, CondExpr {
                test: left,
                consequent,
                alternate,
              })
              .into_wrapped()
            }
            OperatorName::MemberAccess | OperatorName::OptionalChainingMemberAccess => {
              let right = self.consume();
              if !is_valid_member_name(right.typ) {
                return Err(right.error(SyntaxErrorType::ExpectedSyntax("member name")));
              };
              Node::new(left.loc + right.loc, MemberExpr {
                optional_chaining: operator.name == OperatorName::OptionalChainingMemberAccess,
                left,
                right: self.string(right.loc),
              })
              .into_wrapped()
            }
            _ => {
              if operator.name.is_assignment() {
                left = lhs_expr_to_assign_target(left)?;
              };
              let right = self.expr_with_min_prec(next_min_prec, terminators, asi)?;
              Node::new(left.loc + right.loc, BinaryExpr {
                operator: operator.name,
                left,
                right,
              })
              .into_wrapped()
            }
          };
        }
      };
    }

    Ok(left)
  }
}

fn lhs_expr_to_assign_target(target: Node<Expr>) -> SyntaxResult<Node<Expr>> {
  match &*target.stx {
    // Array/object literals and patterns pass through as destructuring targets; whether they're
    // supported is the evaluator's decision, not a syntax question.
    Expr::Id(_)
    | Expr::IdPat(_)
    | Expr::Member(_)
    | Expr::ComputedMember(_)
    | Expr::ArrPat(_)
    | Expr::ObjPat(_)
    | Expr::LitArr(_)
    | Expr::LitObj(_) => Ok(target),
    _ => Err(target.error(SyntaxErrorType::InvalidAssignmentTarget)),
  }
}

/// Decode the escape sequences of a string literal or template segment (delimiters excluded).
pub fn decode_string_text(raw: &str) -> Result<String, SyntaxErrorType> {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    };
    let Some(esc) = chars.next() else {
      return Err(SyntaxErrorType::InvalidCharacterEscape);
    };
    match esc {
      'b' => out.push('\u{0008}'),
      'f' => out.push('\u{000c}'),
      'n' => out.push('\n'),
      'r' => out.push('\r'),
      't' => out.push('\t'),
      'v' => out.push('\u{000b}'),
      '0' if !chars.peek().is_some_and(|d| d.is_ascii_digit()) => out.push('\0'),
      'x' => {
        let hi = chars.next().and_then(|d| d.to_digit(16));
        let lo = chars.next().and_then(|d| d.to_digit(16));
        match (hi, lo) {
          (Some(hi), Some(lo)) => out.push(char::from_u32(hi * 16 + lo).unwrap()),
          _ => return Err(SyntaxErrorType::InvalidCharacterEscape),
        }
      }
      'u' => {
        let cp = decode_unicode_escape(&mut chars)?;
        // Lone surrogates cannot be represented in a Rust string; use the replacement character,
        // except when a full surrogate pair is escaped.
        match cp {
          0xd800..=0xdbff => {
            let pair = try_decode_low_surrogate(&mut chars);
            match pair {
              Some(lo) => {
                let combined = 0x10000 + ((cp - 0xd800) << 10) + (lo - 0xdc00);
                out.push(char::from_u32(combined).ok_or(SyntaxErrorType::InvalidCharacterEscape)?);
              }
              None => out.push(char::REPLACEMENT_CHARACTER),
            }
          }
          0xdc00..=0xdfff => out.push(char::REPLACEMENT_CHARACTER),
          _ => out.push(char::from_u32(cp).ok_or(SyntaxErrorType::InvalidCharacterEscape)?),
        }
      }
      '\r' => {
        // Line continuation; \r\n counts as one terminator.
        if chars.peek() == Some(&'\n') {
          chars.next();
        }
      }
      c if is_line_terminator(c) => {}
      other => out.push(other),
    };
  }
  Ok(out)
}

fn decode_unicode_escape(
  chars: &mut std::iter::Peekable<std::str::Chars>,
) -> Result<u32, SyntaxErrorType> {
  if chars.peek() == Some(&'{') {
    chars.next();
    let mut cp: u32 = 0;
    let mut any = false;
    loop {
      match chars.next() {
        Some('}') => break,
        Some(d) => {
          let digit = d.to_digit(16).ok_or(SyntaxErrorType::InvalidCharacterEscape)?;
          cp = cp
            .checked_mul(16)
            .and_then(|v| v.checked_add(digit))
            .ok_or(SyntaxErrorType::InvalidCharacterEscape)?;
          any = true;
        }
        None => return Err(SyntaxErrorType::InvalidCharacterEscape),
      }
    }
    if !any {
      return Err(SyntaxErrorType::InvalidCharacterEscape);
    };
    Ok(cp)
  } else {
    let mut cp: u32 = 0;
    for _ in 0..4 {
      let digit = chars
        .next()
        .and_then(|d| d.to_digit(16))
        .ok_or(SyntaxErrorType::InvalidCharacterEscape)?;
      cp = cp * 16 + digit;
    }
    Ok(cp)
  }
}

/// If the next characters are `\uDC00`..`\uDFFF`, consume and return the code unit.
fn try_decode_low_surrogate(chars: &mut std::iter::Peekable<std::str::Chars>) -> Option<u32> {
  let lookahead = chars.clone();
  let mut it = lookahead;
  if it.next() != Some('\\') || it.next() != Some('u') {
    return None;
  };
  let mut cp: u32 = 0;
  for _ in 0..4 {
    cp = cp * 16 + it.next()?.to_digit(16)?;
  }
  if !(0xdc00..=0xdfff).contains(&cp) {
    return None;
  };
  *chars = it;
  Some(cp)
}
