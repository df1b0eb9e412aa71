/// Build the URL for `page`, adding `page=` with `?` or `&` based on existing params
///
/// Any `#fragment` is dropped; it is never sent to the server.
pub fn build_paginated_url(base_url: &str, page: u32) -> String {
    let base_url = strip_fragment(base_url);
    let separator = determine_separator(base_url);
    format!("{}{}page={}", base_url, separator, page)
}

fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(before, _)| before)
}

fn determine_separator(url: &str) -> &'static str {
    if url.ends_with('?') || url.ends_with('&') {
        ""
    } else if url.contains('?') {
        "&"
    } else {
        "?"
    }
}
