/// Fuzzy/subsequence match: return the character positions in `haystack`
/// that match `query` (ASCII case-insensitive), or `None` if not matched.
pub fn fuzzy_match_positions(haystack: &str, query: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }

    let mut positions: Vec<usize> = Vec::new();
    let mut hay_iter = haystack.chars().enumerate();

    for qc in query.chars().filter(|c| !c.is_whitespace()) {
        let qc_low = qc.to_ascii_lowercase();
        loop {
            match hay_iter.next() {
                Some((hi, hc)) if hc.to_ascii_lowercase() == qc_low => {
                    positions.push(hi);
                    break;
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }

    Some(positions)
}
