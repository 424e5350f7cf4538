//! Comma separated label lists, as typed into the front end
//! (`"32647535,  32647638, 32648808"`).

use gp_core::Label;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelListError {
    #[error("Label list is empty")]
    Empty,

    #[error("Invalid label '{token}' at position {position}")]
    InvalidLabel { token: String, position: usize },
}

/// Parse a comma separated label list. Blank entries between commas are skipped.
pub fn parse_label_list(text: &str) -> Result<Vec<Label>, LabelListError> {
    let mut labels = Vec::new();
    for (position, token) in text.split(',').enumerate() {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let label = token
            .parse::<Label>()
            .map_err(|_| LabelListError::InvalidLabel {
                token: token.to_string(),
                position,
            })?;
        labels.push(label);
    }
    if labels.is_empty() {
        return Err(LabelListError::Empty);
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_list() {
        let labels = parse_label_list("32647535,  32647638,32648808 ").unwrap();
        assert_eq!(labels, vec![32647535, 32647638, 32648808]);
    }

    #[test]
    fn skips_trailing_comma() {
        assert_eq!(parse_label_list("1, 2,").unwrap(), vec![1, 2]);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_label_list("1, x2, 3").unwrap_err();
        assert_eq!(
            err,
            LabelListError::InvalidLabel {
                token: "x2".to_string(),
                position: 1
            }
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(parse_label_list(" , ").unwrap_err(), LabelListError::Empty);
    }
}
