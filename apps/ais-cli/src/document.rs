use std::path::{Path, PathBuf};

use ais_core::model::document::{DigestAlgorithm, DocumentDigest};
use ais_core::model::outcome::{SignatureValue, SigningOutcome};
use ais_crypto::Hasher;

use crate::CliError;

/// Digest of each whole input file; ids follow the input order
pub async fn load_digests(
    inputs: &[PathBuf],
    algorithm: DigestAlgorithm,
) -> Result<Vec<DocumentDigest>, CliError> {
    let mut documents = Vec::with_capacity(inputs.len());

    for (index, path) in inputs.iter().enumerate() {
        let content = tokio::fs::read(path).await.map_err(|source| CliError::Io {
            path: path.to_owned(),
            source,
        })?;

        documents.push(DocumentDigest {
            id: format!("DOC-{}", index + 1),
            algorithm,
            value: algorithm.hasher().hash(&content)?,
            label: file_name(path),
        });
    }

    Ok(documents)
}

/// Writes `<file name>.p7s` or `<file name>.tsr` for every signed document.
///
/// Nothing is written when two inputs would map to the same output file.
pub async fn write_outputs(
    outcomes: &[SigningOutcome],
    inputs: &[PathBuf],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    let mut targets: Vec<(PathBuf, &SignatureValue)> = vec![];

    for (outcome, input) in outcomes.iter().zip(inputs) {
        let Some(value) = outcome.signature() else {
            continue;
        };
        let extension = match value {
            SignatureValue::Signature(_) => "p7s",
            SignatureValue::TimestampToken(_) => "tsr",
        };
        let path = output_dir.join(format!("{}.{extension}", file_name(input)));

        if targets.iter().any(|(existing, _)| *existing == path) {
            return Err(CliError::OutputCollision(path));
        }
        targets.push((path, value));
    }

    let mut written = Vec::with_capacity(targets.len());
    for (path, value) in targets {
        tokio::fs::write(&path, value.bytes())
            .await
            .map_err(|source| CliError::Io {
                path: path.to_owned(),
                source,
            })?;
        written.push(path);
    }

    Ok(written)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
