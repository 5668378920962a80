use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_line_terminator;
use crate::char::is_whitespace;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use memchr::memchr2;
use once_cell::sync::Lazy;
use std::ops::Index;

/// How the next token should be lexed. `/` is ambiguous between division and a regex literal, and
/// `}` is ambiguous between a block end and a template literal continuation; only the parser
/// knows which applies, so it picks the mode per token.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  SlashIsRegex,
  Standard,
  TemplateStrContinue,
}

#[rustfmt::skip]
pub static KEYWORD_STRS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  [
    ("async", TT::KeywordAsync),
    ("await", TT::KeywordAwait),
    ("break", TT::KeywordBreak),
    ("case", TT::KeywordCase),
    ("catch", TT::KeywordCatch),
    ("class", TT::KeywordClass),
    ("const", TT::KeywordConst),
    ("continue", TT::KeywordContinue),
    ("debugger", TT::KeywordDebugger),
    ("default", TT::KeywordDefault),
    ("delete", TT::KeywordDelete),
    ("do", TT::KeywordDo),
    ("else", TT::KeywordElse),
    ("extends", TT::KeywordExtends),
    ("false", TT::LiteralFalse),
    ("finally", TT::KeywordFinally),
    ("for", TT::KeywordFor),
    ("function", TT::KeywordFunction),
    ("get", TT::KeywordGet),
    ("if", TT::KeywordIf),
    ("in", TT::KeywordIn),
    ("instanceof", TT::KeywordInstanceof),
    ("let", TT::KeywordLet),
    ("new", TT::KeywordNew),
    ("null", TT::LiteralNull),
    ("of", TT::KeywordOf),
    ("return", TT::KeywordReturn),
    ("set", TT::KeywordSet),
    ("static", TT::KeywordStatic),
    ("super", TT::KeywordSuper),
    ("switch", TT::KeywordSwitch),
    ("this", TT::KeywordThis),
    ("throw", TT::KeywordThrow),
    ("true", TT::LiteralTrue),
    ("try", TT::KeywordTry),
    ("typeof", TT::KeywordTypeof),
    ("var", TT::KeywordVar),
    ("void", TT::KeywordVoid),
    ("while", TT::KeywordWhile),
    ("with", TT::KeywordWith),
    ("yield", TT::KeywordYield),
  ]
  .into_iter()
  .collect()
});

pub static KEYWORDS_MAPPING: Lazy<HashMap<TT, &'static str>> =
  Lazy::new(|| KEYWORD_STRS.iter().map(|(s, tt)| (*tt, *s)).collect());

#[derive(Copy, Clone)]
pub struct LexerCheckpoint {
  next: usize,
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, next: 0 }
  }

  pub fn next(&self) -> usize {
    self.next
  }

  fn end(&self) -> usize {
    self.source.len()
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.end())
  }

  fn at_end(&self) -> bool {
    self.next >= self.end()
  }

  fn peek_char(&self, n: usize) -> Option<char> {
    self.source[self.next..].chars().nth(n)
  }

  fn rest(&self) -> &'a str {
    &self.source[self.next..]
  }

  fn skip(&mut self, c: char) {
    self.next += c.len_utf8();
  }

  /// WARNING: Prefer checkpoints instead. Only use this if you know what you're doing.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint { next: self.next }
  }

  pub fn apply_checkpoint(&mut self, checkpoint: LexerCheckpoint) {
    self.next = checkpoint.next;
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, loc: Loc) -> &str {
    &self.source[loc.0..loc.1]
  }
}

pub fn lex_next(lexer: &mut Lexer, mode: LexMode) -> Token {
  let mut preceded_by_line_terminator = false;
  loop {
    let Some(c) = lexer.peek_char(0) else {
      break;
    };
    if is_whitespace(c) {
      lexer.skip(c);
      continue;
    }
    if is_line_terminator(c) {
      preceded_by_line_terminator = true;
      lexer.skip(c);
      continue;
    }
    if c == '/' && lexer.peek_char(1) == Some('/') {
      let comment_len = memchr2(b'\n', b'\r', lexer.rest().as_bytes()).unwrap_or_else(|| {
        lexer.rest().len()
      });
      lexer.next += comment_len;
      continue;
    }
    if c == '/' && lexer.peek_char(1) == Some('*') {
      match lexer.rest()[2..].find("*/") {
        Some(pos) => {
          let comment = &lexer.rest()[..pos + 4];
          if comment.chars().any(is_line_terminator) {
            preceded_by_line_terminator = true;
          }
          lexer.next += pos + 4;
          continue;
        }
        None => {
          // Unterminated comment; surface the rest of the source as an invalid token.
          let loc = Loc(lexer.next, lexer.end());
          lexer.next = lexer.end();
          return Token {
            loc,
            preceded_by_line_terminator,
            typ: TT::Invalid,
          };
        }
      }
    }
    break;
  }

  // The `}` closing a substitution may be preceded by whitespace and comments, so this check
  // comes after the skipping above.
  if mode == LexMode::TemplateStrContinue {
    return with_line_terminator_flag(lex_template_part(lexer, false), preceded_by_line_terminator);
  }

  if lexer.at_end() {
    return Token {
      loc: Loc(lexer.end(), lexer.end()),
      preceded_by_line_terminator,
      typ: TT::EOF,
    };
  }

  let start = lexer.next;
  let c = lexer.peek_char(0).unwrap();

  let typ = if is_id_start(c) {
    lex_identifier_or_keyword(lexer)
  } else if c.is_ascii_digit() || (c == '.' && lexer.peek_char(1).is_some_and(|d| d.is_ascii_digit()))
  {
    lex_number(lexer)
  } else if c == '"' || c == '\'' {
    lex_string(lexer, c)
  } else if c == '`' {
    return with_line_terminator_flag(lex_template_part(lexer, true), preceded_by_line_terminator);
  } else if c == '/' && mode == LexMode::SlashIsRegex {
    lex_regex(lexer)
  } else {
    lex_punctuation(lexer)
  };

  Token {
    loc: Loc(start, lexer.next),
    preceded_by_line_terminator,
    typ,
  }
}

fn with_line_terminator_flag(mut token: Token, preceded_by_line_terminator: bool) -> Token {
  token.preceded_by_line_terminator |= preceded_by_line_terminator;
  token
}

fn lex_identifier_or_keyword(lexer: &mut Lexer) -> TT {
  let start = lexer.next;
  while let Some(c) = lexer.peek_char(0) {
    if !is_id_continue(c) {
      break;
    }
    lexer.skip(c);
  }
  let name = &lexer.source[start..lexer.next];
  KEYWORD_STRS.get(name).copied().unwrap_or(TT::Identifier)
}

fn lex_number(lexer: &mut Lexer) -> TT {
  // Radix-prefixed literal: consume the prefix and every following identifier-ish character; the
  // parser validates the digits via `JsNumber::from_literal`.
  if lexer.peek_char(0) == Some('0')
    && lexer
      .peek_char(1)
      .is_some_and(|c| matches!(c, 'x' | 'X' | 'o' | 'O' | 'b' | 'B'))
  {
    lexer.next += 2;
    while let Some(c) = lexer.peek_char(0) {
      if !c.is_ascii_alphanumeric() && c != '_' {
        break;
      }
      lexer.skip(c);
    }
    return TT::LiteralNumber;
  }

  let mut seen_dot = false;
  let mut seen_exp = false;
  while let Some(c) = lexer.peek_char(0) {
    match c {
      '0'..='9' | '_' => lexer.skip(c),
      '.' if !seen_dot && !seen_exp => {
        seen_dot = true;
        lexer.skip(c);
      }
      'e' | 'E' if !seen_exp => {
        seen_exp = true;
        lexer.skip(c);
        if let Some(sign) = lexer.peek_char(0) {
          if sign == '+' || sign == '-' {
            lexer.skip(sign);
          }
        }
      }
      _ => break,
    }
  }
  TT::LiteralNumber
}

fn lex_string(lexer: &mut Lexer, quote: char) -> TT {
  lexer.skip(quote);
  while let Some(c) = lexer.peek_char(0) {
    if c == '\\' {
      lexer.skip(c);
      if let Some(escaped) = lexer.peek_char(0) {
        lexer.skip(escaped);
      }
      continue;
    }
    if c == quote {
      lexer.skip(c);
      return TT::LiteralString;
    }
    if is_line_terminator(c) {
      return TT::Invalid;
    }
    lexer.skip(c);
  }
  TT::Invalid
}

/// Lex one template literal segment, starting at the opening backtick (`from_start`) or at the
/// `}` closing a substitution. The segment token includes its delimiters; it ends either after
/// `${` (more parts follow) or after the closing backtick (final part).
fn lex_template_part(lexer: &mut Lexer, from_start: bool) -> Token {
  let start = lexer.next;
  // Skip the opening backtick or the `}` that ended the substitution.
  if let Some(c) = lexer.peek_char(0) {
    debug_assert_eq!(c, if from_start { '`' } else { '}' });
    lexer.skip(c);
  }
  let typ = loop {
    let Some(c) = lexer.peek_char(0) else {
      break TT::Invalid;
    };
    match c {
      '\\' => {
        lexer.skip(c);
        if let Some(escaped) = lexer.peek_char(0) {
          lexer.skip(escaped);
        }
      }
      '$' if lexer.peek_char(1) == Some('{') => {
        lexer.next += 2;
        break TT::LiteralTemplatePartString;
      }
      '`' => {
        lexer.skip(c);
        break TT::LiteralTemplatePartStringEnd;
      }
      _ => lexer.skip(c),
    }
  };
  Token {
    loc: Loc(start, lexer.next),
    preceded_by_line_terminator: false,
    typ,
  }
}

fn lex_regex(lexer: &mut Lexer) -> TT {
  lexer.skip('/');
  let mut in_class = false;
  loop {
    let Some(c) = lexer.peek_char(0) else {
      return TT::Invalid;
    };
    if is_line_terminator(c) {
      return TT::Invalid;
    }
    match c {
      '\\' => {
        lexer.skip(c);
        if let Some(escaped) = lexer.peek_char(0) {
          lexer.skip(escaped);
        }
        continue;
      }
      '[' => in_class = true,
      ']' => in_class = false,
      '/' if !in_class => {
        lexer.skip(c);
        break;
      }
      _ => {}
    }
    lexer.skip(c);
  }
  // Flags.
  while let Some(c) = lexer.peek_char(0) {
    if !is_id_continue(c) {
      break;
    }
    lexer.skip(c);
  }
  TT::LiteralRegex
}

fn lex_punctuation(lexer: &mut Lexer) -> TT {
  let rest = lexer.rest().as_bytes();
  let (typ, len) = match rest[0] {
    b'&' => match rest.get(1) {
      Some(b'&') if rest.get(2) == Some(&b'=') => (TT::AmpersandAmpersandEquals, 3),
      Some(b'&') => (TT::AmpersandAmpersand, 2),
      Some(b'=') => (TT::AmpersandEquals, 2),
      _ => (TT::Ampersand, 1),
    },
    b'|' => match rest.get(1) {
      Some(b'|') if rest.get(2) == Some(&b'=') => (TT::BarBarEquals, 3),
      Some(b'|') => (TT::BarBar, 2),
      Some(b'=') => (TT::BarEquals, 2),
      _ => (TT::Bar, 1),
    },
    b'^' => match rest.get(1) {
      Some(b'=') => (TT::CaretEquals, 2),
      _ => (TT::Caret, 1),
    },
    b'=' => match rest.get(1) {
      Some(b'=') if rest.get(2) == Some(&b'=') => (TT::EqualsEqualsEquals, 3),
      Some(b'=') => (TT::EqualsEquals, 2),
      Some(b'>') => (TT::EqualsChevronRight, 2),
      _ => (TT::Equals, 1),
    },
    b'!' => match rest.get(1) {
      Some(b'=') if rest.get(2) == Some(&b'=') => (TT::ExclamationEqualsEquals, 3),
      Some(b'=') => (TT::ExclamationEquals, 2),
      _ => (TT::Exclamation, 1),
    },
    b'<' => match rest.get(1) {
      Some(b'<') if rest.get(2) == Some(&b'=') => (TT::ChevronLeftChevronLeftEquals, 3),
      Some(b'<') => (TT::ChevronLeftChevronLeft, 2),
      Some(b'=') => (TT::ChevronLeftEquals, 2),
      _ => (TT::ChevronLeft, 1),
    },
    b'>' => match (rest.get(1), rest.get(2), rest.get(3)) {
      (Some(b'>'), Some(b'>'), Some(b'=')) => (TT::ChevronRightChevronRightChevronRightEquals, 4),
      (Some(b'>'), Some(b'>'), _) => (TT::ChevronRightChevronRightChevronRight, 3),
      (Some(b'>'), Some(b'='), _) => (TT::ChevronRightChevronRightEquals, 3),
      (Some(b'>'), _, _) => (TT::ChevronRightChevronRight, 2),
      (Some(b'='), _, _) => (TT::ChevronRightEquals, 2),
      _ => (TT::ChevronRight, 1),
    },
    b'+' => match rest.get(1) {
      Some(b'+') => (TT::PlusPlus, 2),
      Some(b'=') => (TT::PlusEquals, 2),
      _ => (TT::Plus, 1),
    },
    b'-' => match rest.get(1) {
      Some(b'-') => (TT::HyphenHyphen, 2),
      Some(b'=') => (TT::HyphenEquals, 2),
      _ => (TT::Hyphen, 1),
    },
    b'*' => match rest.get(1) {
      Some(b'*') if rest.get(2) == Some(&b'=') => (TT::AsteriskAsteriskEquals, 3),
      Some(b'*') => (TT::AsteriskAsterisk, 2),
      Some(b'=') => (TT::AsteriskEquals, 2),
      _ => (TT::Asterisk, 1),
    },
    b'/' => match rest.get(1) {
      Some(b'=') => (TT::SlashEquals, 2),
      _ => (TT::Slash, 1),
    },
    b'%' => match rest.get(1) {
      Some(b'=') => (TT::PercentEquals, 2),
      _ => (TT::Percent, 1),
    },
    b'?' => match (rest.get(1), rest.get(2)) {
      (Some(b'.'), Some(b'(')) => (TT::QuestionDotParenthesisOpen, 3),
      (Some(b'.'), Some(b'[')) => (TT::QuestionDotBracketOpen, 3),
      // `?.` followed by a digit is a conditional (`a?.5:b`), not optional chaining.
      (Some(b'.'), Some(d)) if !d.is_ascii_digit() => (TT::QuestionDot, 2),
      (Some(b'.'), None) => (TT::QuestionDot, 2),
      (Some(b'?'), Some(b'=')) => (TT::QuestionQuestionEquals, 3),
      (Some(b'?'), _) => (TT::QuestionQuestion, 2),
      _ => (TT::Question, 1),
    },
    b'.' => match (rest.get(1), rest.get(2)) {
      (Some(b'.'), Some(b'.')) => (TT::DotDotDot, 3),
      _ => (TT::Dot, 1),
    },
    b'(' => (TT::ParenthesisOpen, 1),
    b')' => (TT::ParenthesisClose, 1),
    b'[' => (TT::BracketOpen, 1),
    b']' => (TT::BracketClose, 1),
    b'{' => (TT::BraceOpen, 1),
    b'}' => (TT::BraceClose, 1),
    b',' => (TT::Comma, 1),
    b';' => (TT::Semicolon, 1),
    b':' => (TT::Colon, 1),
    b'~' => (TT::Tilde, 1),
    _ => {
      // Unknown character; consume it whole so lexing always advances.
      let c = lexer.peek_char(0).unwrap();
      (TT::Invalid, c.len_utf8())
    }
  };
  lexer.next += len;
  typ
}
