//! Search-term highlighting for field labels.

/// Piece of a label, flagged when it is the search match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPart {
    pub text: String,
    pub highlighted: bool,
}

impl LabelPart {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }
}

/// Splits `label` around the first case-insensitive occurrence of `search_term`.
///
/// Without a term, or without a match, the whole label is returned as one
/// plain part. Matching is done on the lowercased label; if lowercasing
/// changes byte lengths (some non-ASCII letters) the label is not split.
pub fn label_parts(label: &str, search_term: &str) -> Vec<LabelPart> {
    if search_term.is_empty() {
        return vec![LabelPart::plain(label)];
    }
    let lower_label = label.to_lowercase();
    let lower_term = search_term.to_lowercase();
    let Some(start) = lower_label.find(&lower_term) else {
        return vec![LabelPart::plain(label)];
    };
    let end = start + lower_term.len();
    if lower_label.len() != label.len() || !label.is_char_boundary(start) || !label.is_char_boundary(end) {
        return vec![LabelPart::plain(label)];
    }

    vec![
        LabelPart::plain(&label[..start]),
        LabelPart {
            text: label[start..end].to_string(),
            highlighted: true,
        },
        LabelPart::plain(&label[end..]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_around_first_match() {
        let parts = label_parts("Backup Email", "EMA");
        assert_eq!(
            parts,
            vec![
                LabelPart::plain("Backup "),
                LabelPart {
                    text: "Ema".into(),
                    highlighted: true
                },
                LabelPart::plain("il"),
            ]
        );
    }

    #[test]
    fn no_term_or_no_match_is_a_single_part() {
        assert_eq!(label_parts("Name", ""), vec![LabelPart::plain("Name")]);
        assert_eq!(label_parts("Name", "zzz"), vec![LabelPart::plain("Name")]);
    }
}
