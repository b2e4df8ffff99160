//! Compiled contract artifact loading
//!
//! Deployment consumes prebuilt artifact JSON keyed by contract name in a
//! configurable directory. Both hardhat (`"bytecode": "0x..."`) and forge
//! (`"bytecode": { "object": "0x..." }`) shapes are accepted. Compiling the
//! contracts is outside this crate.

use alloy::primitives::Bytes;
use serde::Deserialize;
use std::path::Path;

use crate::chain::ContractKind;
use crate::error::RelayError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn hex(&self) -> &str {
        match self {
            RawBytecode::Hex(s) => s,
            RawBytecode::Object { object } => object,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawArtifact {
    bytecode: RawBytecode,
}

/// Creation bytecode for one contract
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Contract name the artifact was loaded under
    pub name: String,
    /// Creation bytecode, constructor arguments not included
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact from its JSON text
    pub fn from_json(name: &str, json: &str) -> Result<Self, RelayError> {
        let raw: RawArtifact = serde_json::from_str(json)
            .map_err(|e| RelayError::deployment(name, format!("invalid artifact JSON: {}", e)))?;

        let hex = raw.bytecode.hex().trim_start_matches("0x");
        let bytecode = hex::decode(hex)
            .map_err(|e| RelayError::deployment(name, format!("invalid bytecode hex: {}", e)))?;

        if bytecode.is_empty() {
            return Err(RelayError::deployment(name, "artifact has empty bytecode"));
        }

        Ok(Self {
            name: name.to_string(),
            bytecode: bytecode.into(),
        })
    }

    /// Load `<dir>/<Name>.json` for a contract
    pub fn load(dir: &Path, contract: ContractKind) -> Result<Self, RelayError> {
        let path = dir.join(format!("{}.json", contract.name()));
        let content = std::fs::read_to_string(&path).map_err(|e| {
            RelayError::deployment(
                contract.name(),
                format!("cannot read artifact {}: {}", path.display(), e),
            )
        })?;
        Self::from_json(contract.name(), &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardhat_shape() {
        let artifact =
            ContractArtifact::from_json("Ping", r#"{"bytecode": "0x6080604052"}"#).unwrap();
        assert_eq!(artifact.name, "Ping");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_forge_shape() {
        let json = r#"{"bytecode": {"object": "0x6001600155"}}"#;
        let artifact = ContractArtifact::from_json("Pong", json).unwrap();
        assert_eq!(artifact.bytecode.len(), 5);
    }

    #[test]
    fn test_rejects_bad_json_and_hex() {
        assert!(matches!(
            ContractArtifact::from_json("Ping", "not json"),
            Err(RelayError::DeploymentFailed { .. })
        ));
        assert!(matches!(
            ContractArtifact::from_json("Ping", r#"{"bytecode": "0xzz"}"#),
            Err(RelayError::DeploymentFailed { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_bytecode() {
        let result = ContractArtifact::from_json("Ping", r#"{"bytecode": "0x"}"#);
        assert!(matches!(result, Err(RelayError::DeploymentFailed { .. })));
    }

    #[test]
    fn test_load_missing_file_names_contract() {
        let err = ContractArtifact::load(Path::new("/nonexistent"), ContractKind::Ping)
            .expect_err("should fail");
        match err {
            RelayError::DeploymentFailed { contract, .. } => assert_eq!(contract, "Ping"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
