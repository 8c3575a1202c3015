//! Id lookup for command arguments.
//!
//! Ids are long UUID strings, so commands accept any unique prefix. An exact
//! match always wins over prefix matches.

pub fn resolve_id<'a>(
    kind: &str,
    query: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Result<&'a str, String> {
    let query = query.trim();
    if query.is_empty() {
        return Err(format!("{kind} id cannot be empty"));
    }

    let mut matches = Vec::new();
    for candidate in candidates {
        if candidate == query {
            return Ok(candidate);
        }
        if candidate.starts_with(query) {
            matches.push(candidate);
        }
    }

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(format!("no {kind} matches `{query}`")),
        many => Err(format!(
            "`{query}` matches {} {kind}s; use a longer prefix",
            many.len()
        )),
    }
}
