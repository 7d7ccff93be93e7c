//! DOI normalization for imported article identifiers.

/// Normalizes a DOI to its bare lowercase form (`10.x/suffix`), stripping
/// resolver-URL and `doi:` prefixes. Returns `None` when the input is not a
/// plausible DOI.
pub fn normalize(input: &str) -> Option<String> {
    let input = input.trim();

    let stripped = input
        .strip_prefix("https://doi.org/")
        .or_else(|| input.strip_prefix("http://doi.org/"))
        .or_else(|| input.strip_prefix("https://dx.doi.org/"))
        .or_else(|| input.strip_prefix("http://dx.doi.org/"))
        .or_else(|| input.strip_prefix("doi:").map(str::trim_start))
        .or_else(|| input.strip_prefix("DOI:").map(str::trim_start))
        .unwrap_or(input);

    // Must start with "10.", contain "/", and have a non-empty suffix.
    if !stripped.starts_with("10.") {
        return None;
    }
    let slash_pos = stripped.find('/')?;
    if stripped[slash_pos + 1..].is_empty() {
        return None;
    }

    Some(stripped.to_lowercase())
}
