use url::Url;

/// Query parameter carrying the continuation token.
pub const SKIP_TOKEN_PARAM: &str = "skipToken";

/// Build the `nextLink` of a page.
///
/// The link is `request_url` with any existing skip token (`skipToken` or `$skipToken`,
/// any case) replaced by `token`. Other query parameters keep their order. No token
/// means no link.
#[must_use]
pub fn next_link_url(request_url: &Url, token: Option<&str>) -> Option<String> {
    let token = token.filter(|t| !t.is_empty())?;

    let kept: Vec<(String, String)> = request_url
        .query_pairs()
        .filter(|(k, _)| !is_skip_token_param(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut link = request_url.clone();
    link.set_fragment(None);
    {
        let mut pairs = link.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(SKIP_TOKEN_PARAM, token);
    }
    Some(link.into())
}

pub(crate) fn is_skip_token_param(name: &str) -> bool {
    let name = name.strip_prefix('$').unwrap_or(name);
    name.eq_ignore_ascii_case(SKIP_TOKEN_PARAM)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const CONTAINERS: &str =
        "http://localhost:8080/planes/radius/local/providers/Applications.Core/containers";

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn absent_token_gives_no_link() {
        let base = url(&format!("{CONTAINERS}?api-version=2023-10-01-preview"));
        assert_eq!(next_link_url(&base, None), None);
        assert_eq!(next_link_url(&base, Some("")), None);
    }

    #[test]
    fn token_is_appended_after_existing_params() {
        let base = url(&format!("{CONTAINERS}?api-version=2023-10-01-preview&top=5"));
        let link = next_link_url(&base, Some("abc")).unwrap();
        assert_eq!(
            link,
            format!("{CONTAINERS}?api-version=2023-10-01-preview&top=5&skipToken=abc")
        );
    }

    #[test]
    fn previous_token_is_replaced_in_any_spelling() {
        let base = url("http://h/p?$SkipToken=old&api-version=v1&skiptoken=older");
        let link = next_link_url(&base, Some("new")).unwrap();
        assert_eq!(link, "http://h/p?api-version=v1&skipToken=new");
    }

    #[test]
    fn token_is_percent_encoded() {
        let base = url("http://h/p?api-version=v1");
        let link = next_link_url(&base, Some("a+b/c=")).unwrap();
        let parsed = url(&link);
        let token = parsed
            .query_pairs()
            .find(|(k, _)| k == SKIP_TOKEN_PARAM)
            .map(|(_, v)| v.into_owned());
        assert_eq!(token.as_deref(), Some("a+b/c="));
    }
}
