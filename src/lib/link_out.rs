use crate::model::LinkOutConfig;

/// Last `|` separated token of a sequence id, `lcl|Chr01` => `Chr01`.
pub const DEFAULT_ID_PATTERN: &str = r"([^|\s]+)\|?$";

static DEFAULT_ID_REGEX: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| {
        regex::Regex::new(DEFAULT_ID_PATTERN).expect("RegExp compilation failed")
    });

#[derive(thiserror::Error, Debug)]
pub enum LinkOutError {
    #[error("Record id pattern is invalid")]
    Regex(#[from] regex::Error),
    #[error("Record id pattern `{0}` needs a capture group")]
    MissingCaptureGroup(String),
}

#[derive(Debug, Clone)]
pub struct LinkOut {
    url_prefix: Option<String>,
    id_regex: regex::Regex,
}

impl Default for LinkOut {
    fn default() -> Self {
        Self {
            url_prefix: None,
            id_regex: DEFAULT_ID_REGEX.clone(),
        }
    }
}

impl TryFrom<&LinkOutConfig> for LinkOut {
    type Error = LinkOutError;

    fn try_from(config: &LinkOutConfig) -> Result<Self, Self::Error> {
        let id_regex = match config.id_pattern.as_deref() {
            Some(pattern) => {
                let regex = regex::Regex::new(pattern)?;

                if regex.captures_len() < 2 {
                    return Err(LinkOutError::MissingCaptureGroup(String::from(pattern)));
                }

                regex
            }
            None => DEFAULT_ID_REGEX.clone(),
        };

        Ok(Self {
            url_prefix: Some(config.url_prefix.clone()),
            id_regex,
        })
    }
}

impl LinkOut {
    /// Record id within a subject id, falls back to the trimmed subject id.
    pub fn record_id<'subject>(&self, subject_id: &'subject str) -> &'subject str {
        self.id_regex
            .captures(subject_id)
            .and_then(|captures| captures.get(1))
            .map(|id| id.as_str())
            .unwrap_or_else(|| subject_id.trim())
    }

    /// Link-out URL with the record id percent encoded.
    pub fn url(&self, subject_id: &str) -> Option<String> {
        let prefix = self.url_prefix.as_deref()?;
        let record_id = self.record_id(subject_id);
        let mut result = String::with_capacity(prefix.len() + record_id.len());

        result.push_str(prefix);
        result.extend(url::form_urlencoded::byte_serialize(record_id.as_bytes()));

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkOut, LinkOutError};
    use crate::model::LinkOutConfig;

    fn link_out(id_pattern: Option<&str>) -> Result<LinkOut, LinkOutError> {
        LinkOut::try_from(&LinkOutConfig {
            url_prefix: String::from("https://www.ncbi.nlm.nih.gov/nuccore/"),
            id_pattern: id_pattern.map(String::from),
        })
    }

    #[test]
    fn default_pattern_takes_last_token() {
        let link_out = LinkOut::default();

        assert_eq!(link_out.record_id("lcl|Chr01"), "Chr01");
        assert_eq!(link_out.record_id("gi|123|ref|NM_001.1|"), "NM_001.1");
        assert_eq!(link_out.record_id("scaffold_12"), "scaffold_12");
        assert!(link_out.url("lcl|Chr01").is_none());
    }

    #[test]
    fn prefix_and_record_id() {
        let link_out = link_out(None).unwrap();

        assert_eq!(
            link_out.url("ref|NM_000546.6|").as_deref(),
            Some("https://www.ncbi.nlm.nih.gov/nuccore/NM_000546.6")
        );
    }

    #[test]
    fn custom_pattern() {
        let link_out = link_out(Some(r"^gene:(\w+)")).unwrap();

        assert_eq!(link_out.record_id("gene:AT1G01010 chr1"), "AT1G01010");
        assert_eq!(
            link_out.url("gene:AT1G01010").as_deref(),
            Some("https://www.ncbi.nlm.nih.gov/nuccore/AT1G01010")
        );
    }

    #[test]
    fn encode_record_id() {
        let link_out = link_out(Some(r"^id=(.+)$")).unwrap();

        assert_eq!(
            link_out.url("id=gene 7#a?b").as_deref(),
            Some("https://www.ncbi.nlm.nih.gov/nuccore/gene+7%23a%3Fb")
        );
        assert!(
            url::Url::parse(&link_out.url("id=gene 7#a?b").unwrap())
                .unwrap()
                .fragment()
                .is_none()
        );
    }

    #[test]
    fn unmatched_pattern_uses_subject_id() {
        let link_out = link_out(Some(r"^gene:(\w+)")).unwrap();

        assert_eq!(link_out.record_id("mRNA_1"), "mRNA_1");
    }

    #[test]
    fn reject_bad_patterns() {
        assert!(matches!(link_out(Some("(")), Err(LinkOutError::Regex(_))));
        assert!(matches!(
            link_out(Some(r"^\S+")),
            Err(LinkOutError::MissingCaptureGroup(_))
        ));
    }
}
