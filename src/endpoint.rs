use reqwest::Url;

use crate::error::AppError;

/// Parse `url` as an API base: absolute, http(s), ending in `/` so that joins
/// append below it instead of replacing the last segment. Joins drop the
/// base's query and fragment, so neither may be present.
pub fn parse_base_url(url: &str) -> Result<Url, AppError> {
    let invalid = |reason: String| AppError::InvalidBaseUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|err| invalid(err.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if !parsed.path().ends_with('/') {
        return Err(invalid("path must end with '/'".into()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".into()));
    }

    Ok(parsed)
}

/// Join a request `path` such as `boards/{id}/lists` onto the API `base`.
///
/// A leading `/` on `path` is ignored. Absolute URLs, and paths that climb out
/// of the base with `..`, are rejected.
pub fn api_url(base: &str, path: &str) -> Result<Url, AppError> {
    let base = parse_base_url(base)?;
    let invalid = |reason: &str| AppError::InvalidEndpoint {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if Url::parse(path).is_ok() {
        return Err(invalid("absolute URLs are not allowed"));
    }

    let joined = base
        .join(path.trim_start_matches('/'))
        .map_err(|err| invalid(&err.to_string()))?;

    if !joined.as_str().starts_with(base.as_str()) {
        return Err(invalid("path escapes the API base url"));
    }

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.trello.com/1/";

    macro_rules! api_url_tests {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (path, exp) = $value;
                    assert_eq!(Url::parse(exp).unwrap(), api_url(BASE, path).unwrap());
                }
            )*
        }
    }

    api_url_tests! {
        api_url_0: ("members/me", "https://api.trello.com/1/members/me"),
        api_url_1: ("/members/me/boards", "https://api.trello.com/1/members/me/boards"),
        api_url_2: (
            "boards/4eea4ffc91e31d1746000046/lists?cards=open",
            "https://api.trello.com/1/boards/4eea4ffc91e31d1746000046/lists?cards=open"
        ),
        api_url_3: ("", "https://api.trello.com/1/"),
        api_url_4: ("cards/a/../b", "https://api.trello.com/1/cards/b"),
    }

    #[test]
    fn test_api_url_rejects_absolute() {
        let err = api_url(BASE, "https://evil.example.com/1/members/me").unwrap_err();
        assert!(matches!(err, AppError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_api_url_rejects_escape() {
        let err = api_url(BASE, "../2/members/me").unwrap_err();
        assert!(matches!(err, AppError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_parse_base_url() {
        let url = parse_base_url(BASE).unwrap();
        assert_eq!("api.trello.com", url.host_str().unwrap());
        assert_eq!("/1/", url.path());

        assert!(matches!(
            parse_base_url("https://api.trello.com/1"),
            Err(AppError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("api.trello.com/1/"),
            Err(AppError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("ftp://api.trello.com/1/"),
            Err(AppError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("https://api.trello.com/1/?key=abc"),
            Err(AppError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("https://api.trello.com/1/#frag"),
            Err(AppError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_api_url_rejects_base_with_query() {
        let err = api_url("https://api.trello.com/1/?key=abc", "members/me").unwrap_err();
        assert!(matches!(err, AppError::InvalidBaseUrl { .. }));
    }
}
