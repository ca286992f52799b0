//! List marker text.
//!
//! Markers depend on the list style, the item's position within its list
//! and the list's nesting depth:
//!
//! | depth | ordered | unordered |
//! |---|---|---|
//! | none, 1 | `1.` `2.` `3.` | `•` |
//! | 2 | `a.` … `z.` `aa.` `ab.` | `⸰` |
//! | any other | `i.` `ii.` `iii.` `iv.` | `⬩` |
//!
//! Everything here is pure. Callers supply the item number (1-based, already
//! adjusted for `start` and `reversed`) and the nesting depth.

use crate::error::{Error, Result};
use crate::paragraph::list::ListStyle;

/// Bullet for top-level unordered items.
pub const BULLET_PRIMARY: &str = "\u{2022}";
/// Bullet for second-level unordered items.
pub const BULLET_SECONDARY: &str = "\u{2E30}";
/// Bullet for every unordered level below the second.
pub const BULLET_TERTIARY: &str = "\u{2B29}";

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

const ROMAN_TABLE: [(i64, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

/// Marker text for one list item.
///
/// `indent_level` is the 1-based nesting depth; `None` behaves like depth 1
/// and depth 0 falls through to the deepest style. Ordered markers require
/// `item_number >= 1`.
///
/// # Examples
///
/// ```
/// use markup_storage::paragraph::{ListStyle, marker_text};
///
/// assert_eq!(marker_text(ListStyle::Ordered, 27, Some(2)).unwrap(), "aa.");
/// assert_eq!(marker_text(ListStyle::Ordered, 49, Some(3)).unwrap(), "xlix.");
/// assert_eq!(marker_text(ListStyle::Unordered, 1, None).unwrap(), "\u{2022}");
/// ```
pub fn marker_text(
    style: ListStyle,
    item_number: i64,
    indent_level: Option<usize>,
) -> Result<String> {
    if item_number <= 0 {
        return Err(Error::InvalidItemNumber(item_number));
    }
    let depth = indent_level.unwrap_or(1);

    let marker = match style {
        ListStyle::Ordered => match depth {
            1 => format!("{item_number}."),
            2 => format!("{}.", alphabetic(item_number)),
            _ => format!("{}.", roman_numeral(item_number)),
        },
        ListStyle::Unordered => match depth {
            1 => BULLET_PRIMARY.to_string(),
            2 => BULLET_SECONDARY.to_string(),
            _ => BULLET_TERTIARY.to_string(),
        },
    };
    Ok(marker)
}

/// Bijective base-26 letters: 1 → `a`, 26 → `z`, 27 → `aa`.
///
/// Callers guarantee `number >= 1`.
fn alphabetic(number: i64) -> String {
    let mut letters = Vec::new();
    let mut value = number;
    while value > 0 {
        let digit = (value - 1) % 26;
        letters.push(ALPHABET[digit as usize]);
        value = (value - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Lowercase Roman numeral by greedy subtraction.
///
/// Values past 3999 repeat `m`. Callers guarantee `number >= 1`.
fn roman_numeral(number: i64) -> String {
    let mut numeral = String::new();
    let mut remainder = number;
    for &(value, symbol) in &ROMAN_TABLE {
        while remainder >= value {
            numeral.push_str(symbol);
            remainder -= value;
        }
    }
    numeral
}
