use crate::core::Passage;

/// Separator between passages on a day card.
pub const CARD_SEPARATOR: &str = " • ";
/// Separator between passages in calendar tooltips.
pub const TOOLTIP_SEPARATOR: &str = ", ";

pub fn format_passages(passages: &[Passage], separator: &str) -> String {
    passages
        .iter()
        .map(Passage::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// English ordinal suffix for a day number: 1st, 2nd, 3rd, 4th, 11th, 22nd.
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_suffix() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 55, 111]
            .iter()
            .map(|n| format!("{}{}", n, ordinal_suffix(*n)))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd",
                "55th", "111th"
            ]
        );
    }

    #[test]
    fn test_format_passages() {
        let passages = vec![Passage::new("Matthew", 25, 28), Passage::new("Mark", 1, 1)];
        assert_eq!(
            format_passages(&passages, CARD_SEPARATOR),
            "Matthew 25-28 • Mark 1"
        );
        assert_eq!(
            format_passages(&passages, TOOLTIP_SEPARATOR),
            "Matthew 25-28, Mark 1"
        );
    }
}
