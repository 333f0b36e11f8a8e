//! Fixed-width text layout helpers shared by the receipt templates.
//!
//! Widths are measured in `char`s, so currency symbols count as one column.

/// Number of visible columns in `text`.
pub(super) fn width(text: &str) -> usize {
    text.chars().count()
}

/// Keep at most `max` columns of `text`.
pub(super) fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Center `text` in `columns`, truncating anything wider. No trailing padding.
pub(super) fn center(text: &str, columns: usize) -> String {
    let text = truncate(text.trim(), columns);
    let pad = columns.saturating_sub(width(&text)) / 2;

    format!("{:pad$}{text}", "")
}

/// `left` flush left and `right` flush right across `columns`.
///
/// At least one space separates the two; `left` is truncated to make room.
pub(super) fn justify(left: &str, right: &str, columns: usize) -> String {
    let room = columns.saturating_sub(width(right) + 1);
    let left = truncate(left, room);
    let gap = columns.saturating_sub(width(&left) + width(right)).max(1);

    format!("{left}{:gap$}{right}", "")
}

/// A horizontal rule made of `ch`.
pub(super) fn rule(ch: char, columns: usize) -> String {
    std::iter::repeat_n(ch, columns).collect()
}

/// Greedy word wrap. Words longer than `columns` are split.
pub(super) fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    if columns == 0 {
        return lines;
    }

    for word in text.split_whitespace() {
        let mut word = word.to_string();

        while width(&word) > columns {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            let head = truncate(&word, columns);
            word = word.chars().skip(columns).collect();
            lines.push(head);
        }

        if current.is_empty() {
            current = word;
        } else if width(&current) + 1 + width(&word) <= columns {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pads_left_only() {
        assert_eq!(center("abc", 9), "   abc");
        assert_eq!(center("abcdefghijk", 4), "abcd");
    }

    #[test]
    fn justify_fills_the_line() {
        assert_eq!(justify("Subtotal", "200.00", 20), "Subtotal      200.00");
        assert_eq!(width(&justify("Subtotal", "₹200.00", 20)), 20);
    }

    #[test]
    fn justify_truncates_left_side() {
        assert_eq!(justify("A very long label", "9.99", 10), "A ver 9.99");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("12 Market Road, Near Bus Stand, Pune", 16),
            vec!["12 Market Road,", "Near Bus Stand,", "Pune"]
        );
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn rule_repeats() {
        assert_eq!(rule('-', 5), "-----");
    }
}
