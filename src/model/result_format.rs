use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Downloadable representations of a finished search.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ResultFormat {
    /// BLAST archive (ASN.1), the source for every other format.
    Archive,
    Tabular,
    Xml,
    Pairwise,
}

#[derive(thiserror::Error, Debug)]
pub enum ResultFormatParseError {
    #[error("Unknown result format `{0}`")]
    Unrecognized(String),
}

impl ResultFormat {
    pub const FORMATTED: [ResultFormat; 3] =
        [ResultFormat::Tabular, ResultFormat::Xml, ResultFormat::Pairwise];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Archive => "result.asn",
            Self::Tabular => "result.tsv",
            Self::Xml => "result.xml",
            Self::Pairwise => "result.txt",
        }
    }

    /// BLAST+ `-outfmt` value.
    pub fn outfmt(self) -> &'static str {
        match self {
            Self::Archive => "11",
            Self::Tabular => "6",
            Self::Xml => "5",
            Self::Pairwise => "0",
        }
    }

    pub fn media_type(self) -> mime::Mime {
        match self {
            Self::Archive => mime::APPLICATION_OCTET_STREAM,
            Self::Tabular => "text/tab-separated-values; charset=utf-8"
                .parse()
                .unwrap_or(mime::TEXT_PLAIN_UTF_8),
            Self::Xml => mime::TEXT_XML,
            Self::Pairwise => mime::TEXT_PLAIN_UTF_8,
        }
    }
}

impl Display for ResultFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Archive => f.write_str("asn"),
            Self::Tabular => f.write_str("tsv"),
            Self::Xml => f.write_str("xml"),
            Self::Pairwise => f.write_str("txt"),
        }
    }
}

impl FromStr for ResultFormat {
    type Err = ResultFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "asn" => ResultFormat::Archive,
            "tsv" => ResultFormat::Tabular,
            "xml" => ResultFormat::Xml,
            "txt" => ResultFormat::Pairwise,
            _ => return Err(ResultFormatParseError::Unrecognized(String::from(value))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ResultFormat;

    #[test]
    fn display_round_trips_through_from_str() {
        for format in [
            ResultFormat::Archive,
            ResultFormat::Tabular,
            ResultFormat::Xml,
            ResultFormat::Pairwise,
        ] {
            assert_eq!(format.to_string().parse::<ResultFormat>().unwrap(), format);
        }

        assert!("html".parse::<ResultFormat>().is_err());
    }

    #[test]
    fn tabular_media_type() {
        assert_eq!(
            ResultFormat::Tabular.media_type().essence_str(),
            "text/tab-separated-values"
        );
    }
}
