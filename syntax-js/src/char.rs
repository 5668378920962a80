/// Character classification helpers for the lexer.
///
/// Identifier characters follow the ECMAScript `IdentifierStart`/`IdentifierPart` productions,
/// approximated with Unicode alphanumerics plus `$`/`_` (full `ID_Start`/`ID_Continue` tables are
/// not carried for this subset).
pub fn is_id_start(c: char) -> bool {
  c == '$' || c == '_' || c.is_alphabetic()
}

pub fn is_id_continue(c: char) -> bool {
  c == '$' || c == '_' || c == '\u{200c}' || c == '\u{200d}' || c.is_alphanumeric()
}

pub fn is_line_terminator(c: char) -> bool {
  matches!(c, '\u{000a}' | '\u{000d}' | '\u{2028}' | '\u{2029}')
}

// ECMA-262 WhiteSpace (line terminators are classified separately).
pub fn is_whitespace(c: char) -> bool {
  matches!(
    c,
    '\u{0009}'
      | '\u{000b}'
      | '\u{000c}'
      | '\u{0020}'
      | '\u{00a0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200a}'
      | '\u{202f}'
      | '\u{205f}'
      | '\u{3000}'
      | '\u{feff}'
  )
}
