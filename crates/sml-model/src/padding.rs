use serde::{Deserialize, Serialize};

/// Inner spacing of a page or container, in the renderer's units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub const ZERO: Padding = Padding::uniform(0);

    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `vertical` for top and bottom, `horizontal` for right and left.
    pub const fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

/// Parse a padding string like `"8"`, `"4 8"` or `"1 2 3 4"`.
///
/// One value applies to all sides, two are vertical then horizontal, four
/// are top, right, bottom, left. Any other count, or any token that is not
/// a non-negative integer, gives zero padding.
pub fn parse_padding(value: &str) -> Padding {
    let values: Option<Vec<u32>> = value
        .split_whitespace()
        .map(|token| token.parse().ok())
        .collect();

    match values.as_deref() {
        Some(&[all]) => Padding::uniform(all),
        Some(&[vertical, horizontal]) => Padding::symmetric(vertical, horizontal),
        Some(&[top, right, bottom, left]) => Padding::new(top, right, bottom, left),
        _ => Padding::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("8", Padding::new(8, 8, 8, 8))]
    #[case("4 8", Padding::new(4, 8, 4, 8))]
    #[case("1 2 3 4", Padding::new(1, 2, 3, 4))]
    #[case("  16  ", Padding::uniform(16))]
    #[case("4  8", Padding::new(4, 8, 4, 8))]
    fn test_padding_rules(#[case] input: &str, #[case] expected: Padding) {
        assert_eq!(parse_padding(input), expected);
    }

    #[rstest]
    #[case("1 2 3")]
    #[case("1 2 3 4 5")]
    #[case("")]
    #[case("wide")]
    #[case("4 x")]
    #[case("-4")]
    fn test_padding_falls_back_to_zero(#[case] input: &str) {
        assert_eq!(parse_padding(input), Padding::ZERO);
    }
}
