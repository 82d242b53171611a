use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceType {
    Nucleotide,
    Protein,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlastProgram {
    Blastn,
    Blastx,
    Blastp,
    Tblastn,
    Tblastx,
}

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum SequenceParseError {
    #[error("Unknown sequence type `{0}`")]
    UnknownSequenceType(String),
    #[error("Unknown BLAST program `{0}`")]
    UnknownProgram(String),
    #[error("{program} can't search a {query} query against a {database} database")]
    Incompatible {
        program: BlastProgram,
        query: SequenceType,
        database: SequenceType,
    },
}

impl Display for SequenceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nucleotide => f.write_str("nucleotide"),
            Self::Protein => f.write_str("protein"),
        }
    }
}

impl FromStr for SequenceType {
    type Err = SequenceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "nucleotide" => SequenceType::Nucleotide,
            "protein" => SequenceType::Protein,
            _ => return Err(SequenceParseError::UnknownSequenceType(String::from(value))),
        })
    }
}

impl Display for BlastProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binary_name())
    }
}

impl FromStr for BlastProgram {
    type Err = SequenceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "blastn" => BlastProgram::Blastn,
            "blastx" => BlastProgram::Blastx,
            "blastp" => BlastProgram::Blastp,
            "tblastn" => BlastProgram::Tblastn,
            "tblastx" => BlastProgram::Tblastx,
            _ => return Err(SequenceParseError::UnknownProgram(String::from(value))),
        })
    }
}

impl BlastProgram {
    /// Picks the program for a query / database type pair.
    ///
    /// `requested` only matters for nucleotide against nucleotide, where
    /// `tblastx` may be chosen over the default `blastn`.
    pub fn select(
        query: SequenceType,
        database: SequenceType,
        requested: Option<BlastProgram>,
    ) -> Result<Self, SequenceParseError> {
        let program = requested.unwrap_or(match (query, database) {
            (SequenceType::Nucleotide, SequenceType::Nucleotide) => BlastProgram::Blastn,
            (SequenceType::Nucleotide, SequenceType::Protein) => BlastProgram::Blastx,
            (SequenceType::Protein, SequenceType::Protein) => BlastProgram::Blastp,
            (SequenceType::Protein, SequenceType::Nucleotide) => BlastProgram::Tblastn,
        });

        if program.query_type() == query && program.database_type() == database {
            Ok(program)
        } else {
            Err(SequenceParseError::Incompatible {
                program,
                query,
                database,
            })
        }
    }

    pub fn binary_name(self) -> &'static str {
        match self {
            Self::Blastn => "blastn",
            Self::Blastx => "blastx",
            Self::Blastp => "blastp",
            Self::Tblastn => "tblastn",
            Self::Tblastx => "tblastx",
        }
    }

    pub fn query_type(self) -> SequenceType {
        match self {
            Self::Blastn | Self::Blastx | Self::Tblastx => SequenceType::Nucleotide,
            Self::Blastp | Self::Tblastn => SequenceType::Protein,
        }
    }

    pub fn database_type(self) -> SequenceType {
        match self {
            Self::Blastn | Self::Tblastn | Self::Tblastx => SequenceType::Nucleotide,
            Self::Blastx | Self::Blastp => SequenceType::Protein,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlastProgram, SequenceParseError, SequenceType};

    #[test]
    fn default_program_per_type_pair() {
        use SequenceType::{Nucleotide, Protein};

        assert_eq!(
            BlastProgram::select(Nucleotide, Nucleotide, None),
            Ok(BlastProgram::Blastn)
        );
        assert_eq!(
            BlastProgram::select(Nucleotide, Protein, None),
            Ok(BlastProgram::Blastx)
        );
        assert_eq!(
            BlastProgram::select(Protein, Protein, None),
            Ok(BlastProgram::Blastp)
        );
        assert_eq!(
            BlastProgram::select(Protein, Nucleotide, None),
            Ok(BlastProgram::Tblastn)
        );
    }

    #[test]
    fn tblastx_on_request() {
        assert_eq!(
            BlastProgram::select(
                SequenceType::Nucleotide,
                SequenceType::Nucleotide,
                Some(BlastProgram::Tblastx)
            ),
            Ok(BlastProgram::Tblastx)
        );
    }

    #[test]
    fn reject_mismatched_request() {
        assert_eq!(
            BlastProgram::select(
                SequenceType::Protein,
                SequenceType::Protein,
                Some(BlastProgram::Blastn)
            ),
            Err(SequenceParseError::Incompatible {
                program: BlastProgram::Blastn,
                query: SequenceType::Protein,
                database: SequenceType::Protein,
            })
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("protein".parse::<SequenceType>(), Ok(SequenceType::Protein));
        assert_eq!("tblastn".parse::<BlastProgram>(), Ok(BlastProgram::Tblastn));
        assert!("dna".parse::<SequenceType>().is_err());
        assert!("psiblast".parse::<BlastProgram>().is_err());
    }
}
