use argline::{format_list, format_paragraph, Chunk};
use proptest::prelude::*;

/// Words of at most eight letters separated by runs of spaces.
fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(("[a-z]{1,8}", " {1,3}"), 1..40).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, spaces)| word + &spaces)
            .collect::<String>()
            .trim_end()
            .to_owned()
    })
}

fn paragraph(text: &str, indent: usize, width: usize) -> String {
    let mut out = String::new();
    format_paragraph(&mut out, text, indent, width).unwrap();
    out
}

proptest! {
    #[test]
    fn wrapping_keeps_words(text in text(), width in 10usize..100) {
        let out = paragraph(&text, 0, width);

        let words = text.split_whitespace().collect::<Vec<_>>();
        let wrapped = out.split_whitespace().collect::<Vec<_>>();
        prop_assert_eq!(wrapped, words);
    }

    #[test]
    fn lines_stay_within_width(text in text(), indent in 0usize..20, width in 2usize..100) {
        let out = paragraph(&text, indent, width);

        for line in out.lines() {
            prop_assert!(line.chars().count() < width, "{:?} exceeds {}", line, width);
        }
    }

    #[test]
    fn no_wrapping_below_two_columns(text in text(), indent in 0usize..20, width in 0usize..2) {
        prop_assert_eq!(paragraph(&text, indent, width), format!("{}\n", text));
    }

    #[test]
    fn stacked_lists_are_not_wrapped(
        items in prop::collection::vec(("[a-z-]{1,12}", text()), 1..6),
        width in 0usize..20,
    ) {
        let mut chunk = Chunk::new("options");

        for (label, description) in &items {
            chunk.push(label.as_str(), description.as_str());
        }

        let mut out = String::new();
        format_list(&mut out, &[chunk], width).unwrap();

        // A blank line, the title, then one line per item.
        let lines = out.lines().collect::<Vec<_>>();
        prop_assert_eq!(lines.len(), items.len() + 2);

        for (line, (label, description)) in lines[2..].iter().zip(&items) {
            let prefix = format!(" {} ", label);
            prop_assert!(line.starts_with(&prefix));
            prop_assert!(line.ends_with(description.as_str()));
        }
    }

    #[test]
    fn tabular_lists_stay_within_width(
        items in prop::collection::vec(("[a-z-]{1,12}", text()), 1..6),
        width in 20usize..100,
    ) {
        let mut chunk = Chunk::new("options");

        for (label, description) in &items {
            chunk.push(label.as_str(), description.as_str());
        }

        let mut out = String::new();
        format_list(&mut out, &[chunk], width).unwrap();

        for line in out.lines() {
            prop_assert!(line.chars().count() < width, "{:?} exceeds {}", line, width);
        }
    }
}
