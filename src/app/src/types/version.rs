use std::cmp::Ordering;

/// One run of a version string: either all ASCII digits or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

impl<'a> Segment<'a> {
    fn as_str(&self) -> &'a str {
        match self {
            Segment::Number(s) | Segment::Text(s) => s,
        }
    }
}

fn segments(version: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut rest = version;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let numeric = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != numeric)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(if numeric {
            Segment::Number(run)
        } else {
            Segment::Text(run)
        })
    })
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_segments(a: Segment<'_>, b: Segment<'_>) -> Ordering {
    match (a, b) {
        (Segment::Number(a), Segment::Number(b)) => compare_numbers(a, b),
        (Segment::Text(a), Segment::Text(b)) => compare_text(a, b),
        // A digit run and a text run never start with the same character.
        (a, b) => a.as_str().cmp(b.as_str()),
    }
}

/// Ascending numeric-aware ordering: digit runs compare by value, everything
/// else lexically.
///
/// Strings that are equal run by run but differ in their text (`"1.01"` and
/// `"1.1"`) fall back to a plain comparison so the ordering stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match compare_segments(l, r) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

/// Firmware list ordering: newest version first.
///
/// ```
/// use otgw_ui_core::types::compare_versions;
/// let mut versions = vec!["2.9", "2.10", "1.0"];
/// versions.sort_by(|a, b| compare_versions(a, b));
/// assert_eq!(versions, ["2.10", "2.9", "1.0"]);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    natural_cmp(b, a)
}
