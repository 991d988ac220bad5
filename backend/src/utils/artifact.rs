use alloy::primitives::Bytes;
use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::Path};

/// `bytecode` is a bare hex string (hardhat) or `{ "object": "0x..." }` (foundry).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    Hex(String),
    Object { object: String },
}

#[derive(Debug, Deserialize)]
struct TokenArtifact {
    bytecode: Option<ArtifactBytecode>,
}

/// Creation bytecode from the JSON text of a compiled contract artifact.
pub fn parse_creation_code(artifact_json: &str) -> Result<Bytes> {
    let artifact: TokenArtifact = serde_json::from_str(artifact_json)
        .map_err(|e| anyhow::anyhow!("Invalid token artifact: {}", e))?;

    let hex_code = match artifact.bytecode {
        Some(ArtifactBytecode::Hex(code)) | Some(ArtifactBytecode::Object { object: code }) => code,
        None => return Err(anyhow::anyhow!("Bytecode not found in token artifact")),
    };

    let hex_code = hex_code.trim();
    let code = hex::decode(hex_code.strip_prefix("0x").unwrap_or(hex_code))
        .map_err(|e| anyhow::anyhow!("Invalid bytecode hex: {}", e))?;
    if code.is_empty() {
        return Err(anyhow::anyhow!("Token artifact has empty bytecode"));
    }

    Ok(code.into())
}

pub fn load_creation_code(path: impl AsRef<Path>) -> Result<Bytes> {
    let path = path.as_ref();
    let artifact_json = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read token artifact {}: {}", path.display(), e))?;
    parse_creation_code(&artifact_json)
}
