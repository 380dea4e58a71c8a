//! Input normalization for free-form expression strings.
//!
//! Students type math the way they write it by hand: backslashes for
//! division, spaces for multiplication, hyphenated unit compounds. These
//! passes rewrite that into a canonical operator-separated form before any
//! parsing happens. Sanitization is best-effort and total — malformed input
//! comes out as a malformed-but-sanitized string and is rejected later by
//! the structural pre-check.
//!
//! Both entry points are idempotent: sanitizing twice gives the same string.

/// Normalize a numeric expression string.
///
/// `" (2) x "` becomes `"(2)*x"`, `"2 \\ 3"` becomes `"2/3"`,
/// `"2 sqrt(4)"` becomes `"2*sqrt(4)"`.
pub fn sanitize_number(input: &str) -> String {
    let slashed = input.trim().replace('\\', "/");
    let collapsed = collapse_whitespace(&slashed);
    let despaced = strip_operator_spaces(&collapsed);
    let bridged = insert_bracket_multiplication(&despaced);
    bridged.replace(' ', "*")
}

/// Normalize a unit expression string.
///
/// Same passes as [`sanitize_number`], plus hyphenated compounds become
/// products: `"kg-m"` becomes `"kg*m"` while `"10^-3"` keeps its sign.
pub fn sanitize_unit(input: &str) -> String {
    let slashed = input.trim().replace('\\', "/");
    let collapsed = collapse_whitespace(&slashed);
    let hyphenless = rewrite_hyphen_compounds(&collapsed);
    let despaced = strip_operator_spaces(&hyphenless);
    let bridged = insert_bracket_multiplication(&despaced);
    bridged.replace(' ', "*")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')' | '[' | ']')
}

/// Drop spaces that touch an operator or bracket. The spaces that survive
/// this pass sit between two operands and carry multiplication meaning.
fn strip_operator_spaces(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let after_operator = i > 0 && is_operator(chars[i - 1]);
            let before_operator = chars.get(i + 1).map(|&n| is_operator(n)).unwrap_or(true);
            if after_operator || before_operator {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Make implicit multiplication explicit between a closing bracket and a
/// following word character: `"(2)x"` becomes `"(2)*x"`.
fn insert_bracket_multiplication(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if matches!(prev, Some(')' | ']')) && (c.is_alphanumeric() || c == '_') {
            out.push('*');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// A hyphen followed by anything but a digit joins unit names
/// (`"kg-m"`), not a signed exponent (`"^-3"`).
fn rewrite_hyphen_compounds(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            match chars.get(i + 1) {
                Some(next) if !next.is_ascii_digit() => {
                    out.push('*');
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}
