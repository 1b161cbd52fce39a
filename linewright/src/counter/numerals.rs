// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alphabetic and roman numeral conversion.
//!
//! Every converter returns `None` for a value it cannot represent or a string it
//! cannot parse.

use alloc::string::String;
use alloc::vec::Vec;

const UNITS: [&str; 10] = ["", "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix"];
const TENS: [&str; 10] = ["", "x", "xx", "xxx", "xl", "l", "lx", "lxx", "lxxx", "xc"];
const HUNDREDS: [&str; 10] = ["", "c", "cc", "ccc", "cd", "d", "dc", "dcc", "dccc", "cm"];
const THOUSANDS: [&str; 4] = ["", "m", "mm", "mmm"];

/// Largest value with a roman representation.
pub const MAX_ROMAN: u32 = 3999;

/// Lowercase roman numeral for `n`; zero is the empty string.
pub fn to_roman_lower(n: u32) -> Option<String> {
    if n > MAX_ROMAN {
        log::warn!("{n} has no roman numeral representation");
        return None;
    }
    let n = n as usize;
    let mut s = String::new();
    s.push_str(THOUSANDS[n / 1000]);
    s.push_str(HUNDREDS[(n / 100) % 10]);
    s.push_str(TENS[(n / 10) % 10]);
    s.push_str(UNITS[n % 10]);
    Some(s)
}

/// Uppercase roman numeral for `n`; zero is the empty string.
pub fn to_roman_upper(n: u32) -> Option<String> {
    to_roman_lower(n).map(|s| s.to_ascii_uppercase())
}

/// Parses a roman numeral in either case.
pub fn from_roman(s: &str) -> Option<u32> {
    let lower = s.to_ascii_lowercase();
    let mut rest = lower.as_str();
    let mut value = 0_u32;
    let tables: [(&[&str], u32); 4] = [
        (&THOUSANDS, 1000),
        (&HUNDREDS, 100),
        (&TENS, 10),
        (&UNITS, 1),
    ];
    for (table, base) in tables {
        // Highest digit first, so "viii" wins over "v".
        for digit in (1..=9_u32).rev() {
            let Some(repr) = table.get(digit as usize) else {
                continue;
            };
            if let Some(tail) = rest.strip_prefix(*repr) {
                value += digit * base;
                rest = tail;
                break;
            }
        }
    }
    if value == 0 || !rest.is_empty() {
        return None;
    }
    Some(value)
}

/// Bijective base-26 lowercase numbering: `1 → a`, `26 → z`, `27 → aa`.
pub fn to_alpha_lower(n: u32) -> Option<String> {
    if n == 0 {
        return None;
    }
    let mut n = n;
    let mut digits = Vec::new();
    while n > 0 {
        n -= 1;
        digits.push(char::from_u32(u32::from('a') + n % 26)?);
        n /= 26;
    }
    Some(digits.iter().rev().collect())
}

/// Bijective base-26 uppercase numbering: `1 → A`, `26 → Z`, `27 → AA`.
pub fn to_alpha_upper(n: u32) -> Option<String> {
    to_alpha_lower(n).map(|s| s.to_ascii_uppercase())
}

/// Parses bijective base-26 letters in either case.
pub fn from_alpha(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    s.chars().try_fold(0_u32, |acc, c| {
        let c = c.to_ascii_lowercase();
        if !c.is_ascii_lowercase() {
            return None;
        }
        let digit = u32::from(c) - u32::from('a') + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roman_round_trip() {
        for n in 1..=MAX_ROMAN {
            let roman = to_roman_upper(n).unwrap();
            assert_eq!(from_roman(&roman), Some(n), "round trip of {n} via {roman}");
        }
    }

    #[test]
    fn roman_spot_checks() {
        assert_eq!(to_roman_lower(4).as_deref(), Some("iv"));
        assert_eq!(to_roman_upper(1994).as_deref(), Some("MCMXCIV"));
        assert_eq!(to_roman_upper(3999).as_deref(), Some("MMMCMXCIX"));
        assert_eq!(to_roman_lower(0).as_deref(), Some(""));
        assert_eq!(to_roman_lower(4000), None, "out of range");
    }

    #[test]
    fn roman_rejects_garbage() {
        assert_eq!(from_roman(""), None);
        assert_eq!(from_roman("abc"), None);
        assert_eq!(from_roman("iiii"), None);
        assert_eq!(from_roman("mmmm"), None);
        assert_eq!(from_roman("xiv"), Some(14));
    }

    #[test]
    fn alpha_boundaries() {
        assert_eq!(to_alpha_lower(1).as_deref(), Some("a"));
        assert_eq!(to_alpha_lower(26).as_deref(), Some("z"));
        assert_eq!(to_alpha_lower(27).as_deref(), Some("aa"));
        assert_eq!(to_alpha_lower(52).as_deref(), Some("az"));
        assert_eq!(to_alpha_lower(53).as_deref(), Some("ba"));
        assert_eq!(to_alpha_upper(702).as_deref(), Some("ZZ"));
        assert_eq!(to_alpha_upper(703).as_deref(), Some("AAA"));
        assert_eq!(to_alpha_lower(0), None, "no letter for zero");
    }

    #[test]
    fn alpha_round_trip() {
        for n in 1..10_000 {
            let alpha = to_alpha_lower(n).unwrap();
            assert_eq!(from_alpha(&alpha), Some(n), "round trip of {n} via {alpha}");
        }
    }

    #[test]
    fn alpha_rejects_garbage() {
        assert_eq!(from_alpha(""), None);
        assert_eq!(from_alpha("a1"), None);
        assert_eq!(from_alpha("AB"), Some(28));
    }
}
