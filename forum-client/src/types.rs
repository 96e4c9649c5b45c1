use crate::error::Error;

const URL_PATH_PREFIX: &str = "/t/";

/// The slug and numeric id Discourse-style forums encode into a topic URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    pub slug: String,
    pub id: u64,
}

/// Checks that `url` points at a topic on `base_path`: it must start with
/// the configured base path, and its path must be exactly `/t/<slug>/<id>`
/// with a non-empty slug and a numeric id.
pub fn validate_topic_url(base_path: &str, url: &str) -> Result<(), Error> {
    if !url.starts_with(base_path) && !url.starts_with(URL_PATH_PREFIX) {
        return Err(Error::InvalidUrl(format!(
            "expected a url under {base_path:?}, got {url:?}"
        )));
    }

    let parsed = url::Url::parse(url).or_else(|_| {
        url::Url::parse(&format!("{}{}", base_path.trim_end_matches('/'), url))
    });
    let parsed = parsed.map_err(|source| {
        Error::InvalidUrl(format!("could not parse {url:?} as a url: {source}"))
    })?;

    let components: Vec<&str> = parsed
        .path()
        .trim_end_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if components.len() != 3 {
        return Err(Error::InvalidUrl(format!(
            "expected 3 path components, got {} in {url:?}",
            components.len()
        )));
    }
    if components[0] != "t" {
        return Err(Error::InvalidUrl(format!(
            "expected the first path component to be 't', got {:?} in {url:?}",
            components[0]
        )));
    }
    if components[1].is_empty() {
        return Err(Error::InvalidUrl(format!(
            "topic slug is empty in {url:?}"
        )));
    }
    if components[2].parse::<u64>().is_err() {
        return Err(Error::InvalidUrl(format!(
            "expected a numeric topic id, got {:?} in {url:?}",
            components[2]
        )));
    }

    Ok(())
}

/// Extracts the slug and id from a url already known to be a valid topic
/// url (see [`validate_topic_url`]).
pub fn parse_topic_info(base_path: &str, url: &str) -> Result<TopicInfo, Error> {
    validate_topic_url(base_path, url)?;

    let parsed = url::Url::parse(url)
        .or_else(|_| url::Url::parse(&format!("{}{}", base_path.trim_end_matches('/'), url)))
        .map_err(|source| Error::InvalidUrl(format!("could not parse {url:?}: {source}")))?;
    let components: Vec<&str> = parsed
        .path()
        .trim_end_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    Ok(TopicInfo {
        slug: components[1].to_string(),
        id: components[2].parse().expect("validated numeric above"),
    })
}

pub fn topic_info_to_absolute_url(base_path: &str, info: &TopicInfo) -> String {
    format!(
        "{}{}{}/{}",
        base_path.trim_end_matches('/'),
        URL_PATH_PREFIX,
        info.slug,
        info.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_a_well_formed_topic_url() {
        assert!(validate_topic_url("https://discourse.example", "https://discourse.example/t/my-topic/42").is_ok());
    }

    #[test]
    fn rejects_a_url_with_the_wrong_base_path() {
        let err = validate_topic_url("https://discourse.example", "https://other.example/t/my-topic/42");
        assert!(err.is_err());
    }

    #[test]
    fn rejects_a_non_numeric_topic_id() {
        let err = validate_topic_url("https://discourse.example", "https://discourse.example/t/my-topic/not-a-number");
        assert!(err.is_err());
    }

    #[test]
    fn rejects_an_empty_slug() {
        let err = validate_topic_url("https://discourse.example", "https://discourse.example/t//42");
        assert!(err.is_err());
    }

    #[test]
    fn round_trips_topic_info_through_absolute_url() {
        let info = parse_topic_info("https://discourse.example", "https://discourse.example/t/my-topic/42").unwrap();
        assert_eq!(info.slug, "my-topic");
        assert_eq!(info.id, 42);
        assert_eq!(
            topic_info_to_absolute_url("https://discourse.example", &info),
            "https://discourse.example/t/my-topic/42"
        );
    }
}
