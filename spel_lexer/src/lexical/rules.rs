//! The lexical rule catalogue
//!
//! A rule looks at the cursor without moving it and either declines or
//! proposes how many characters it would consume. Rules that recognise the
//! start of a literal but not its required continuation propose a
//! `Failure` claiming the characters they did recognise, so a malformed
//! literal outranks any shorter well-formed reading of the same text.
//!
//! `RULES` is ordered by priority: when two proposals have the same length
//! the earlier rule wins. The order puts reserved words ahead of the
//! identifier rule.

use super::cursor::Cursor;
use super::disambiguator;
use crate::grammar::Keyword;
use crate::tokens::TokenKind;

/// Code point that may never appear inside a string literal body
pub const STRING_BODY_EXCLUDED: char = '\u{FFFF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFailure {
    UnterminatedString,
    MalformedNumber,
}

/// A rule's offer for the text at the cursor. Lengths are in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
    Match { len: usize, kind: TokenKind },
    Failure { len: usize, failure: RuleFailure },
}

impl Proposal {
    pub fn len(&self) -> usize {
        match self {
            Proposal::Match { len, .. } | Proposal::Failure { len, .. } => *len,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Proposal::Failure { .. })
    }
}

pub type Matcher = fn(&Cursor<'_>) -> Option<Proposal>;

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matcher: Matcher,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

macro_rules! rule {
    ($name:literal, $matcher:expr) => {
        Rule {
            name: $name,
            matcher: $matcher,
        }
    };
}

pub static RULES: &[Rule] = &[
    rule!("new", keyword_new),
    rule!("semicolon-rparen", semicolon_rparen),
    rule!("integer-literal", integer_literal),
    rule!("hex-integer-literal", hex_integer_literal),
    rule!("assign", assign),
    rule!("equal", equal),
    rule!("not-equal", not_equal),
    rule!("less-than", less_than),
    rule!("less-than-or-equal", less_than_or_equal),
    rule!("greater-than", greater_than),
    rule!("greater-than-or-equal", greater_than_or_equal),
    rule!("in", keyword_in),
    rule!("is", keyword_is),
    rule!("between", keyword_between),
    rule!("matches", keyword_matches),
    rule!("null", keyword_null),
    rule!("semicolon", semicolon),
    rule!("dot", dot),
    rule!("comma", comma),
    rule!("lparen", lparen),
    rule!("rparen", rparen),
    rule!("lcurly", lcurly),
    rule!("rcurly", rcurly),
    rule!("lbracket", lbracket),
    rule!("rbracket", rbracket),
    rule!("pipe", pipe),
    rule!("and", keyword_and),
    rule!("or", keyword_or),
    rule!("false", keyword_false),
    rule!("true", keyword_true),
    rule!("plus", plus),
    rule!("minus", minus),
    rule!("div", div),
    rule!("star", star),
    rule!("mod", modulo),
    rule!("power", power),
    rule!("bang", bang),
    rule!("pound", pound),
    rule!("qmark", qmark),
    rule!("default-coalesce", default_coalesce),
    rule!("lambda-open", lambda_open),
    rule!("project-open", project_open),
    rule!("select-open", select_open),
    rule!("select-first-open", select_first_open),
    rule!("select-last-open", select_last_open),
    rule!("type-reference-open", type_reference_open),
    rule!("string-literal-single", string_literal_single),
    rule!("string-literal-double", string_literal_double),
    rule!("identifier", identifier),
    rule!("dot-escaped", dot_escaped),
    rule!("whitespace", whitespace),
    rule!("dollar", dollar),
    rule!("at", at),
    rule!("range-upto", range_upto),
    rule!("colon", colon),
    rule!("real-literal", real_literal),
];

/// Match `text` exactly at the cursor
fn literal_text(cursor: &Cursor<'_>, text: &str, kind: TokenKind) -> Option<Proposal> {
    let present = text
        .chars()
        .enumerate()
        .all(|(k, ch)| cursor.peek(k) == Some(ch));

    present.then(|| Proposal::Match {
        len: text.chars().count(),
        kind,
    })
}

fn fixed(cursor: &Cursor<'_>, kind: TokenKind) -> Option<Proposal> {
    literal_text(cursor, kind.fixed_text()?, kind)
}

fn keyword(cursor: &Cursor<'_>, keyword: Keyword) -> Option<Proposal> {
    literal_text(cursor, keyword.as_str(), keyword.token_kind())
}

macro_rules! fixed_rules {
    ($($name:ident => $kind:ident),* $(,)?) => {
        $(
            fn $name(cursor: &Cursor<'_>) -> Option<Proposal> {
                fixed(cursor, TokenKind::$kind)
            }
        )*
    };
}

macro_rules! keyword_rules {
    ($($name:ident => $keyword:ident),* $(,)?) => {
        $(
            fn $name(cursor: &Cursor<'_>) -> Option<Proposal> {
                keyword(cursor, Keyword::$keyword)
            }
        )*
    };
}

fixed_rules! {
    semicolon_rparen => SemicolonRparen,
    assign => Assign,
    equal => Equal,
    not_equal => NotEqual,
    less_than => LessThan,
    less_than_or_equal => LessThanOrEqual,
    greater_than => GreaterThan,
    greater_than_or_equal => GreaterThanOrEqual,
    semicolon => Semicolon,
    dot => Dot,
    comma => Comma,
    lparen => Lparen,
    rparen => Rparen,
    lcurly => Lcurly,
    rcurly => Rcurly,
    lbracket => Lbracket,
    rbracket => Rbracket,
    pipe => Pipe,
    plus => Plus,
    minus => Minus,
    div => Div,
    star => Star,
    modulo => Mod,
    power => Power,
    bang => Bang,
    pound => Pound,
    qmark => Qmark,
    default_coalesce => DefaultCoalesce,
    lambda_open => LambdaOpen,
    project_open => ProjectOpen,
    select_open => SelectOpen,
    select_first_open => SelectFirstOpen,
    select_last_open => SelectLastOpen,
    type_reference_open => TypeReferenceOpen,
    dot_escaped => DotEscaped,
    dollar => Dollar,
    at => At,
    range_upto => RangeUpto,
    colon => Colon,
}

keyword_rules! {
    keyword_new => New,
    keyword_in => In,
    keyword_is => Is,
    keyword_between => Between,
    keyword_matches => Matches,
    keyword_null => Null,
    keyword_and => And,
    keyword_or => Or,
    keyword_false => False,
    keyword_true => True,
}

/// Run of ASCII digits in `radix` starting `from` characters ahead
fn digits_from(cursor: &Cursor<'_>, from: usize, radix: u32) -> usize {
    cursor
        .rest()
        .chars()
        .skip(from)
        .take_while(|c| c.is_digit(radix))
        .count()
}

fn is_char_at(cursor: &Cursor<'_>, k: usize, accepted: &[char]) -> bool {
    cursor.peek(k).map_or(false, |c| accepted.contains(&c))
}

const INTEGER_TYPE_SUFFIX: &[char] = &['L', 'l'];
const REAL_TYPE_SUFFIX: &[char] = &['F', 'f', 'D', 'd'];
const EXPONENT_MARKER: &[char] = &['E', 'e'];
const SIGN: &[char] = &['+', '-'];

fn integer_literal(cursor: &Cursor<'_>) -> Option<Proposal> {
    let digits = digits_from(cursor, 0, 10);
    if digits == 0 {
        return None;
    }
    let suffix = usize::from(is_char_at(cursor, digits, INTEGER_TYPE_SUFFIX));
    Some(Proposal::Match {
        len: digits + suffix,
        kind: TokenKind::IntegerLiteral,
    })
}

fn hex_integer_literal(cursor: &Cursor<'_>) -> Option<Proposal> {
    if cursor.peek(0) != Some('0') || !is_char_at(cursor, 1, &['x', 'X']) {
        return None;
    }

    let digits = digits_from(cursor, 2, 16);
    if digits == 0 {
        return Some(Proposal::Failure {
            len: 2,
            failure: RuleFailure::MalformedNumber,
        });
    }

    let len = 2 + digits;
    let suffix = usize::from(is_char_at(cursor, len, INTEGER_TYPE_SUFFIX));
    Some(Proposal::Match {
        len: len + suffix,
        kind: TokenKind::HexIntegerLiteral,
    })
}

/// Exponent part starting `at` characters ahead: marker, optional sign, digits.
/// `Err` carries the length claimed when the digits are missing.
fn exponent_from(cursor: &Cursor<'_>, at: usize) -> Option<Result<usize, usize>> {
    if !is_char_at(cursor, at, EXPONENT_MARKER) {
        return None;
    }

    let mut len = 1;
    if is_char_at(cursor, at + len, SIGN) {
        len += 1;
    }

    match digits_from(cursor, at + len, 10) {
        0 => Some(Err(len)),
        digits => Some(Ok(len + digits)),
    }
}

/// Optional exponent and real type suffix after a mantissa of `len` characters
fn finish_real(cursor: &Cursor<'_>, mut len: usize) -> Proposal {
    match exponent_from(cursor, len) {
        Some(Ok(exponent)) => len += exponent,
        Some(Err(claimed)) => {
            return Proposal::Failure {
                len: len + claimed,
                failure: RuleFailure::MalformedNumber,
            }
        }
        None => {}
    }

    if is_char_at(cursor, len, REAL_TYPE_SUFFIX) {
        len += 1;
    }

    Proposal::Match {
        len,
        kind: TokenKind::RealLiteral,
    }
}

/// `.` digits [exponent] [suffix]
fn real_leading_dot(cursor: &Cursor<'_>) -> Option<Proposal> {
    if cursor.peek(0) != Some('.') {
        return None;
    }
    match digits_from(cursor, 1, 10) {
        0 => None,
        fraction => Some(finish_real(cursor, 1 + fraction)),
    }
}

/// digits `.` digits [exponent] [suffix]
///
/// A dot followed by another dot is a range operator and is left alone.
/// A dot followed by anything else is a fraction with no digits.
fn real_fraction(cursor: &Cursor<'_>) -> Option<Proposal> {
    let whole = digits_from(cursor, 0, 10);
    if whole == 0 || cursor.peek(whole) != Some('.') {
        return None;
    }

    match digits_from(cursor, whole + 1, 10) {
        0 if cursor.peek(whole + 1) == Some('.') => None,
        0 => Some(Proposal::Failure {
            len: whole + 1,
            failure: RuleFailure::MalformedNumber,
        }),
        fraction => Some(finish_real(cursor, whole + 1 + fraction)),
    }
}

/// digits exponent [suffix]
fn real_exponent(cursor: &Cursor<'_>) -> Option<Proposal> {
    let whole = digits_from(cursor, 0, 10);
    if whole == 0 || !is_char_at(cursor, whole, EXPONENT_MARKER) {
        return None;
    }
    Some(finish_real(cursor, whole))
}

/// digits suffix
fn real_suffix_only(cursor: &Cursor<'_>) -> Option<Proposal> {
    let whole = digits_from(cursor, 0, 10);
    if whole == 0 || !is_char_at(cursor, whole, REAL_TYPE_SUFFIX) {
        return None;
    }
    Some(Proposal::Match {
        len: whole + 1,
        kind: TokenKind::RealLiteral,
    })
}

static REAL_ALTERNATIVES: &[Matcher] = &[
    real_leading_dot,
    real_fraction,
    real_exponent,
    real_suffix_only,
];

/// The four real literal forms share prefixes, so they are resolved by the
/// same longest-match selection the outer catalogue uses.
fn real_literal(cursor: &Cursor<'_>) -> Option<Proposal> {
    let proposals = REAL_ALTERNATIVES
        .iter()
        .enumerate()
        .filter_map(|(priority, alternative)| alternative(cursor).map(|p| (priority, p)));

    disambiguator::longest(proposals).map(|(_, proposal)| proposal)
}

/// Quoted text. Single-quoted bodies escape the quote by doubling it.
fn quoted(cursor: &Cursor<'_>, quote: char, doubling_escapes: bool, kind: TokenKind) -> Option<Proposal> {
    if cursor.peek(0) != Some(quote) {
        return None;
    }

    let mut chars = cursor.rest().chars().skip(1).peekable();
    let mut len = 1;

    while let Some(ch) = chars.next() {
        if ch == STRING_BODY_EXCLUDED {
            break;
        }
        len += 1;
        if ch == quote {
            if doubling_escapes && chars.peek() == Some(&quote) {
                chars.next();
                len += 1;
                continue;
            }
            return Some(Proposal::Match { len, kind });
        }
    }

    Some(Proposal::Failure {
        len,
        failure: RuleFailure::UnterminatedString,
    })
}

fn string_literal_single(cursor: &Cursor<'_>) -> Option<Proposal> {
    quoted(cursor, '\'', true, TokenKind::StringLiteralSingle)
}

fn string_literal_double(cursor: &Cursor<'_>) -> Option<Proposal> {
    quoted(cursor, '"', false, TokenKind::StringLiteralDouble)
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Letter or underscore, then letters, digits, underscores or `\.` pairs
fn identifier(cursor: &Cursor<'_>) -> Option<Proposal> {
    if !cursor.peek(0).map_or(false, is_identifier_start) {
        return None;
    }

    let mut chars = cursor.rest().chars().skip(1).peekable();
    let mut len = 1;

    while let Some(&ch) = chars.peek() {
        if is_identifier_part(ch) {
            chars.next();
            len += 1;
        } else if ch == '\\' {
            chars.next();
            if chars.peek() != Some(&'.') {
                break;
            }
            chars.next();
            len += 2;
        } else {
            break;
        }
    }

    Some(Proposal::Match {
        len,
        kind: TokenKind::Identifier,
    })
}

fn whitespace(cursor: &Cursor<'_>) -> Option<Proposal> {
    let len = cursor
        .rest()
        .chars()
        .take_while(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
        .count();

    (len > 0).then_some(Proposal::Match {
        len,
        kind: TokenKind::Whitespace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn propose(rule: Matcher, text: &str) -> Option<Proposal> {
        rule(&Cursor::new(text))
    }

    fn matched(len: usize, kind: TokenKind) -> Option<Proposal> {
        Some(Proposal::Match { len, kind })
    }

    #[test]
    fn test_catalogue_names_are_unique() {
        let mut names: Vec<_> = RULES.iter().map(|rule| rule.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn test_keywords_precede_identifier() {
        let position = |name: &str| RULES.iter().position(|rule| rule.name == name).unwrap();
        let identifier = position("identifier");
        for keyword in Keyword::ALL {
            assert!(position(keyword.as_str()) < identifier, "{}", keyword);
        }
        assert!(position("type-reference-open") < identifier);
    }

    #[test]
    fn test_fixed_rules_decline_other_text() {
        assert_eq!(propose(equal, "=="), matched(2, TokenKind::Equal));
        assert_eq!(propose(equal, "="), None);
        assert_eq!(propose(type_reference_open, "T("), matched(2, TokenKind::TypeReferenceOpen));
        assert_eq!(propose(type_reference_open, "Te"), None);
        assert_eq!(propose(keyword_between, "betwee"), None);
        assert_eq!(propose(keyword_null, "nullable"), matched(4, TokenKind::NullLiteral));
    }

    #[test]
    fn test_integer_forms() {
        assert_eq!(propose(integer_literal, "42"), matched(2, TokenKind::IntegerLiteral));
        assert_eq!(propose(integer_literal, "3L"), matched(2, TokenKind::IntegerLiteral));
        assert_eq!(propose(integer_literal, "7l+"), matched(2, TokenKind::IntegerLiteral));
        assert_eq!(propose(integer_literal, "x1"), None);
        assert_eq!(propose(hex_integer_literal, "0x1Fl"), matched(5, TokenKind::HexIntegerLiteral));
        assert_eq!(
            propose(hex_integer_literal, "0xg"),
            Some(Proposal::Failure {
                len: 2,
                failure: RuleFailure::MalformedNumber
            })
        );
        assert_eq!(propose(hex_integer_literal, "01"), None);
    }

    #[test]
    fn test_real_alternatives() {
        assert_eq!(propose(real_literal, ".5"), matched(2, TokenKind::RealLiteral));
        assert_eq!(propose(real_literal, "3.14"), matched(4, TokenKind::RealLiteral));
        assert_eq!(propose(real_literal, "3e10"), matched(4, TokenKind::RealLiteral));
        assert_eq!(propose(real_literal, "1.5E-3d"), matched(7, TokenKind::RealLiteral));
        assert_eq!(propose(real_literal, "2f"), matched(2, TokenKind::RealLiteral));
        assert_eq!(propose(real_literal, ".25e+2F"), matched(7, TokenKind::RealLiteral));
        assert_eq!(propose(real_literal, "3"), None);
        assert_eq!(propose(real_literal, "3L"), None);
        assert_eq!(propose(real_literal, "3..5"), None);
        assert_eq!(propose(real_literal, ".x"), None);
    }

    #[test]
    fn test_real_failures_claim_recognised_prefix() {
        let failure = |len| {
            Some(Proposal::Failure {
                len,
                failure: RuleFailure::MalformedNumber,
            })
        };
        assert_eq!(propose(real_literal, "3."), failure(2));
        assert_eq!(propose(real_literal, "3.x"), failure(2));
        assert_eq!(propose(real_literal, "3e"), failure(2));
        assert_eq!(propose(real_literal, "3e+"), failure(3));
        assert_eq!(propose(real_literal, "1.5e"), failure(4));
    }

    #[test]
    fn test_string_bodies() {
        assert_eq!(
            propose(string_literal_single, "'it''s' rest"),
            matched(7, TokenKind::StringLiteralSingle)
        );
        assert_eq!(propose(string_literal_single, "''"), matched(2, TokenKind::StringLiteralSingle));
        assert_eq!(
            propose(string_literal_double, "\"say 'hi'\""),
            matched(10, TokenKind::StringLiteralDouble)
        );
        assert_eq!(
            propose(string_literal_double, "\"\"\""),
            matched(2, TokenKind::StringLiteralDouble)
        );
        assert_eq!(
            propose(string_literal_single, "'\u{0}\u{FFFE}\n'"),
            matched(5, TokenKind::StringLiteralSingle)
        );
    }

    #[test]
    fn test_unterminated_strings() {
        let unterminated = |len| {
            Some(Proposal::Failure {
                len,
                failure: RuleFailure::UnterminatedString,
            })
        };
        assert_eq!(propose(string_literal_single, "'abc"), unterminated(4));
        assert_eq!(propose(string_literal_single, "'it''"), unterminated(5));
        assert_eq!(propose(string_literal_double, "\"ab\u{FFFF}\""), unterminated(3));
    }

    #[test]
    fn test_identifier_forms() {
        assert_eq!(propose(identifier, "T"), matched(1, TokenKind::Identifier));
        assert_eq!(propose(identifier, "_a1 b"), matched(3, TokenKind::Identifier));
        assert_eq!(propose(identifier, "a\\.b"), matched(4, TokenKind::Identifier));
        assert_eq!(propose(identifier, "a\\b"), matched(1, TokenKind::Identifier));
        assert_eq!(propose(identifier, "a.b"), matched(1, TokenKind::Identifier));
        assert_eq!(propose(identifier, "1a"), None);
        assert_eq!(propose(identifier, "été"), None);
    }

    #[test]
    fn test_whitespace_run() {
        assert_eq!(propose(whitespace, " \t\r\n x"), matched(5, TokenKind::Whitespace));
        assert_eq!(propose(whitespace, "x"), None);
    }
}
