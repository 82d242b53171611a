use std::path::{Path, PathBuf};

use crate::model::SequenceType;

pub const DEFAULT_BROWSER_FOLDER: &str = "data";

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Catalog file couldn't be read")]
    Read(#[from] std::io::Error),
    #[error("Catalog file is malformed")]
    Parse(#[from] toml::de::Error),
    #[error("BLAST database `{0}` is defined more than once")]
    DuplicateDatabase(String),
    #[error("BLAST database name must not be empty")]
    EmptyDatabaseName,
}

/// Administrator curated content of the catalog file.
///
/// ```toml
/// [browser]
/// base_url = "http://example.org/jbrowse/index.html?data="
/// default_folder = "data"
///
/// [[browser.mapping]]
/// database = "Test1 - Nucleotide"
/// folder = "test1"
///
/// [[database]]
/// name = "Test1 - Nucleotide"
/// path = "/srv/blast/test1_nt"
/// kind = "nucleotide"
/// link_out = { url_prefix = "https://www.ncbi.nlm.nih.gov/nuccore/" }
/// ```
#[derive(serde::Deserialize, Debug, Default)]
pub struct Catalog {
    pub browser: Option<BrowserConfig>,
    #[serde(default, rename = "database")]
    pub databases: Vec<BlastDatabase>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct BrowserConfig {
    pub base_url: String,
    #[serde(default = "default_folder")]
    pub default_folder: String,
    #[serde(default)]
    pub mapping: Vec<BrowserMapping>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct BrowserMapping {
    pub database: String,
    pub folder: String,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct BlastDatabase {
    pub name: String,
    #[serde(skip_serializing)]
    pub path: PathBuf,
    pub kind: SequenceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing)]
    pub link_out: Option<LinkOutConfig>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct LinkOutConfig {
    pub url_prefix: String,
    pub id_pattern: Option<String>,
}

fn default_folder() -> String {
    String::from(DEFAULT_BROWSER_FOLDER)
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;

        contents.parse()
    }

    pub fn database(&self, name: &str) -> Option<&BlastDatabase> {
        self.databases.iter().find(|database| database.name == name)
    }

    pub fn databases_of_kind(
        &self,
        kind: Option<SequenceType>,
    ) -> impl Iterator<Item = &BlastDatabase> {
        self.databases
            .iter()
            .filter(move |database| kind.is_none_or(|kind| database.kind == kind))
    }

    fn validate(self) -> Result<Self, CatalogError> {
        for (index, database) in self.databases.iter().enumerate() {
            if database.name.trim().is_empty() {
                return Err(CatalogError::EmptyDatabaseName);
            }

            if self.databases[..index]
                .iter()
                .any(|other| other.name == database.name)
            {
                return Err(CatalogError::DuplicateDatabase(database.name.clone()));
            }
        }

        Ok(self)
    }
}

impl std::str::FromStr for Catalog {
    type Err = CatalogError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        toml::from_str::<Catalog>(contents)?.validate()
    }
}
