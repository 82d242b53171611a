use crate::model::{BrowserConfig, DEFAULT_BROWSER_FOLDER};

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum BrowserConfigError {
    #[error("Browser base URL is invalid")]
    UrlParse(#[from] url::ParseError),
    #[error("Browser base URL `{0}` must end with the data parameter (e.g. `?data=`)")]
    MissingDataParameter(String),
    #[error("Default browser folder must not be empty")]
    EmptyDefaultFolder,
    #[error("Browser folder for `{0}` must not be empty")]
    EmptyFolder(String),
    #[error("BLAST database `{0}` is mapped to more than one browser folder")]
    DuplicateMapping(String),
}

/// Resolves BLAST database names to genome browser instances.
///
/// The mapping keeps its configured order, lookups compare database names
/// exactly and fall back to the default folder.
#[derive(Debug, Clone)]
pub struct BrowserLinks {
    base_url: String,
    default_folder: String,
    mapping: Vec<(String, String)>,
}

impl TryFrom<BrowserConfig> for BrowserLinks {
    type Error = BrowserConfigError;

    fn try_from(config: BrowserConfig) -> Result<Self, Self::Error> {
        url::Url::parse(&config.base_url)?;

        if !config.base_url.ends_with('=') {
            return Err(BrowserConfigError::MissingDataParameter(config.base_url));
        }

        if config.default_folder.trim().is_empty() {
            return Err(BrowserConfigError::EmptyDefaultFolder);
        }

        let mut mapping: Vec<(String, String)> = Vec::with_capacity(config.mapping.len());

        for entry in config.mapping {
            if entry.folder.trim().is_empty() {
                return Err(BrowserConfigError::EmptyFolder(entry.database));
            }

            if mapping.iter().any(|(database, _)| *database == entry.database) {
                return Err(BrowserConfigError::DuplicateMapping(entry.database));
            }

            mapping.push((entry.database, entry.folder));
        }

        Ok(Self {
            base_url: config.base_url,
            default_folder: config.default_folder,
            mapping,
        })
    }
}

impl BrowserLinks {
    /// Links every database to `<base_url>data`.
    pub fn with_default_folder(base_url: &str) -> Result<Self, BrowserConfigError> {
        Self::try_from(BrowserConfig {
            base_url: String::from(base_url),
            default_folder: String::from(DEFAULT_BROWSER_FOLDER),
            mapping: Vec::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_folder(&self) -> &str {
        &self.default_folder
    }

    pub fn resolve_folder(&self, database: &str) -> &str {
        self.mapping
            .iter()
            .find(|(name, _)| name == database)
            .map(|(_, folder)| folder.as_str())
            .unwrap_or(&self.default_folder)
    }

    /// Genome browser location of a subject region, e.g. `Chr01:100..250`.
    ///
    /// Minus strand hits report `start > end`, the browser expects them ordered.
    pub fn location(record_id: &str, start: usize, end: usize) -> String {
        format!("{}:{}..{}", record_id, start.min(end), start.max(end))
    }

    pub fn link(&self, database: &str, location: &str) -> String {
        let folder = self.resolve_folder(database);
        let mut result =
            String::with_capacity(self.base_url.len() + folder.len() + location.len() + 16);

        result.push_str(&self.base_url);
        result.extend(url::form_urlencoded::byte_serialize(folder.as_bytes()));
        result.push_str("&loc=");
        result.extend(url::form_urlencoded::byte_serialize(location.as_bytes()));

        result
    }
}

#[cfg(test)]
mod tests {
    use super::{BrowserConfigError, BrowserLinks};
    use crate::model::{BrowserConfig, BrowserMapping};

    const BASE_URL: &str = "http://oururl.org/jbrowse/index.html?data=";

    fn mapping(database: &str, folder: &str) -> BrowserMapping {
        BrowserMapping {
            database: String::from(database),
            folder: String::from(folder),
        }
    }

    fn links() -> BrowserLinks {
        BrowserLinks::try_from(BrowserConfig {
            base_url: String::from(BASE_URL),
            default_folder: String::from("data"),
            mapping: vec![
                mapping("Test1 - Nucleotide", "test1"),
                mapping("Test1 - Protein", "test1"),
                mapping("Test2 - Nucleotide", "test2"),
                mapping("Test3 - Nucleotide", "test 3"),
            ],
        })
        .unwrap()
    }

    fn query_pair(url: &url::Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }

    #[test]
    fn mapped_databases_use_their_folder() {
        let links = links();

        assert_eq!(links.resolve_folder("Test1 - Nucleotide"), "test1");
        assert_eq!(links.resolve_folder("Test1 - Protein"), "test1");
        assert_eq!(links.resolve_folder("Test2 - Nucleotide"), "test2");
    }

    #[test]
    fn unmapped_databases_use_default_folder() {
        let links = links();

        assert_eq!(links.resolve_folder("Test4 - Nucleotide"), "data");
        assert_eq!(links.resolve_folder("test1 - nucleotide"), "data");
        assert_eq!(links.resolve_folder(""), "data");
    }

    #[test]
    fn link_concatenates_base_folder_and_location() {
        let links = links();

        assert_eq!(
            links.link("Test2 - Nucleotide", "Chr01:10..20"),
            "http://oururl.org/jbrowse/index.html?data=test2&loc=Chr01%3A10..20"
        );
        assert_eq!(
            links.link("unknown", "Chr01:10..20"),
            "http://oururl.org/jbrowse/index.html?data=data&loc=Chr01%3A10..20"
        );
    }

    #[test]
    fn every_link_is_well_formed() {
        let links = links();

        for database in [
            "Test1 - Nucleotide",
            "Test1 - Protein",
            "Test2 - Nucleotide",
            "Test3 - Nucleotide",
            "Unmapped & odd=name",
        ] {
            let location = BrowserLinks::location("scaffold_1|x&y", 500, 20);
            let url = url::Url::parse(&links.link(database, &location)).unwrap();

            assert_eq!(url.path(), "/jbrowse/index.html");
            assert_eq!(
                query_pair(&url, "data").as_deref(),
                Some(links.resolve_folder(database))
            );
            assert_eq!(
                query_pair(&url, "loc").as_deref(),
                Some("scaffold_1|x&y:20..500")
            );
            assert_eq!(url.query_pairs().count(), 2);
        }
    }

    #[test]
    fn location_orders_coordinates() {
        assert_eq!(BrowserLinks::location("Chr02", 9, 3), "Chr02:3..9");
        assert_eq!(BrowserLinks::location("Chr02", 3, 9), "Chr02:3..9");
    }

    #[test]
    fn single_browser_default() {
        let links = BrowserLinks::with_default_folder(BASE_URL).unwrap();

        assert_eq!(links.default_folder(), "data");
        assert_eq!(links.base_url(), BASE_URL);
        assert_eq!(
            links.link("anything", "c:1..2"),
            "http://oururl.org/jbrowse/index.html?data=data&loc=c%3A1..2"
        );
    }

    #[test]
    fn reject_invalid_config() {
        assert!(matches!(
            BrowserLinks::with_default_folder("not a url"),
            Err(BrowserConfigError::UrlParse(_))
        ));
        assert_eq!(
            BrowserLinks::with_default_folder("http://oururl.org/jbrowse/index.html").unwrap_err(),
            BrowserConfigError::MissingDataParameter(String::from(
                "http://oururl.org/jbrowse/index.html"
            ))
        );
        assert_eq!(
            BrowserLinks::try_from(BrowserConfig {
                base_url: String::from(BASE_URL),
                default_folder: String::from(" "),
                mapping: Vec::new(),
            })
            .unwrap_err(),
            BrowserConfigError::EmptyDefaultFolder
        );
        assert_eq!(
            BrowserLinks::try_from(BrowserConfig {
                base_url: String::from(BASE_URL),
                default_folder: String::from("data"),
                mapping: vec![mapping("a", "x"), mapping("a", "y")],
            })
            .unwrap_err(),
            BrowserConfigError::DuplicateMapping(String::from("a"))
        );
        assert_eq!(
            BrowserLinks::try_from(BrowserConfig {
                base_url: String::from(BASE_URL),
                default_folder: String::from("data"),
                mapping: vec![mapping("a", "")],
            })
            .unwrap_err(),
            BrowserConfigError::EmptyFolder(String::from("a"))
        );
    }
}
