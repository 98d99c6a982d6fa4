//! Delimited id lists as accepted by the delete operations, e.g. `"1,2,3"`.

/// Split a comma-separated id list.
///
/// Entries are trimmed, blanks dropped and repeats collapsed (first one wins).
/// Ids are opaque: no format check happens here.
pub fn parse_id_list(ids: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in ids.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        if !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_empty() {
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list("   ").is_empty());
        assert!(parse_id_list(" , ,").is_empty());
    }

    #[test]
    fn test_trims_and_dedupes() {
        assert_eq!(parse_id_list("1, 2 ,,1,3"), vec!["1", "2", "3"]);
    }
}
