use crate::model::SequenceType;

const NUCLEOTIDE_RESIDUES: &[u8] = b"ACGTURYKMSWBDHVN-";
const PROTEIN_RESIDUES: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ*-";
const DEFAULT_HEADER: &str = ">query";

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum FastaError {
    #[error("No sequence was provided")]
    Empty,
    #[error("Record `{0}` has no sequence")]
    EmptyRecord(String),
    #[error("Invalid {kind} residue `{residue}` in record `{record}`")]
    InvalidResidue {
        kind: SequenceType,
        record: String,
        residue: char,
    },
    #[error("Sequence is longer than {0} residues")]
    TooLong(usize),
}

/// Validates user supplied sequence text and returns it as FASTA.
///
/// A bare sequence gets a `>query` header, whitespace and position numbers
/// inside sequence lines are dropped. `max_residues` bounds the total length.
pub fn normalize_sequence(
    input: &str,
    kind: SequenceType,
    max_residues: Option<usize>,
) -> Result<String, FastaError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(FastaError::Empty);
    }

    let allowed = match kind {
        SequenceType::Nucleotide => NUCLEOTIDE_RESIDUES,
        SequenceType::Protein => PROTEIN_RESIDUES,
    };
    let mut output = String::with_capacity(input.len() + DEFAULT_HEADER.len() + 1);
    let mut header = String::from(DEFAULT_HEADER);
    let mut record_length = 0usize;
    let mut total_length = 0usize;
    let mut has_record = false;

    for line in input.lines().map(str::trim) {
        if line.starts_with('>') {
            if has_record {
                check_record(&header, record_length)?;
            }

            header = String::from(line);
            record_length = 0;
            has_record = true;
            output.push_str(line);
            output.push('\n');
            continue;
        }

        if !has_record {
            has_record = true;
            output.push_str(DEFAULT_HEADER);
            output.push('\n');
        }

        let start = output.len();

        for residue in line.chars() {
            if residue.is_whitespace() || residue.is_ascii_digit() {
                continue;
            }

            let upper = residue.to_ascii_uppercase();

            if !upper.is_ascii() || !allowed.contains(&(upper as u8)) {
                return Err(FastaError::InvalidResidue {
                    kind,
                    record: record_name(&header),
                    residue,
                });
            }

            output.push(upper);
            record_length += 1;
            total_length += 1;
        }

        if let Some(max_residues) = max_residues {
            if total_length > max_residues {
                return Err(FastaError::TooLong(max_residues));
            }
        }

        if output.len() > start {
            output.push('\n');
        }
    }

    check_record(&header, record_length)?;

    Ok(output)
}

fn check_record(header: &str, length: usize) -> Result<(), FastaError> {
    if length == 0 {
        Err(FastaError::EmptyRecord(record_name(header)))
    } else {
        Ok(())
    }
}

fn record_name(header: &str) -> String {
    header
        .trim_start_matches('>')
        .split_whitespace()
        .next()
        .map(String::from)
        .unwrap_or_default()
}
