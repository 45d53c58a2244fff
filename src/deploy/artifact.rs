//! Precompiled contract artifacts and constructor argument encoding.

use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::primitives::{hex, Bytes};
use serde::Deserialize;
use std::path::Path;

use crate::config::ConstructorArg;
use crate::deploy::DeployError;

/// The parts of a hardhat artifact JSON the deployer reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    /// Hex creation bytecode.
    pub bytecode: String,
}

impl Artifact {
    /// Read an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let content = std::fs::read_to_string(path).map_err(|source| DeployError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Decoded creation bytecode.
    pub fn creation_code(&self) -> Result<Bytes, DeployError> {
        let code = hex::decode(self.bytecode.trim()).map_err(|e| {
            DeployError::Bytecode(format!(
                "{}: {} (unlinked libraries are not supported)",
                self.contract_name, e
            ))
        })?;
        if code.is_empty() {
            return Err(DeployError::Bytecode(format!(
                "{} has no creation bytecode (abstract contract or interface?)",
                self.contract_name
            )));
        }
        Ok(code.into())
    }
}

/// ABI-encode constructor arguments. No arguments encode to nothing.
pub fn encode_constructor_args(args: &[ConstructorArg]) -> Result<Bytes, DeployError> {
    let mut values = Vec::with_capacity(args.len());
    for (index, arg) in args.iter().enumerate() {
        let value = DynSolType::parse(&arg.ty)
            .and_then(|ty| ty.coerce_str(&arg.value))
            .map_err(|e| DeployError::Argument {
                index,
                ty: arg.ty.clone(),
                message: e.to_string(),
            })?;
        values.push(value);
    }

    if values.is_empty() {
        return Ok(Bytes::new());
    }
    Ok(DynSolValue::Tuple(values).abi_encode_params().into())
}

/// Creation bytecode followed by the encoded constructor arguments.
pub fn deploy_code(creation_code: &[u8], encoded_args: &[u8]) -> Bytes {
    let mut code = Vec::with_capacity(creation_code.len() + encoded_args.len());
    code.extend_from_slice(creation_code);
    code.extend_from_slice(encoded_args);
    code.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};
    use alloy::sol_types::SolValue;
    use std::io::Write;

    fn arg(ty: &str, value: &str) -> ConstructorArg {
        ConstructorArg {
            ty: ty.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_single_address_arg() {
        let encoded = encode_constructor_args(&[arg(
            "address",
            "0x66e8cf86Ae35A96e4B67021689B4fCf47C3267c5",
        )])
        .unwrap();
        let expected = address!("66e8cf86Ae35A96e4B67021689B4fCf47C3267c5").abi_encode();
        assert_eq!(encoded.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_mixed_args_match_static_encoding() {
        let encoded = encode_constructor_args(&[
            arg("address", "0x0BFbCF9fa4f9C56B0F40a671Ad40E0805A091865"),
            arg("address", "0x9a489505a00cE272eAa5e07Dba6491314CaE3796"),
            arg("uint24[]", "[100, 500, 2500, 10000]"),
        ])
        .unwrap();

        let expected = (
            address!("0BFbCF9fa4f9C56B0F40a671Ad40E0805A091865"),
            address!("9a489505a00cE272eAa5e07Dba6491314CaE3796"),
            vec![U256::from(100), U256::from(500), U256::from(2500), U256::from(10000)],
        )
            .abi_encode_params();
        assert_eq!(encoded.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_no_args() {
        assert!(encode_constructor_args(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bad_arg_reports_index() {
        let err = encode_constructor_args(&[arg("uint256", "5"), arg("address", "0x12")]).unwrap_err();
        match err {
            DeployError::Argument { index, ty, .. } => {
                assert_eq!(index, 1);
                assert_eq!(ty, "address");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_artifact_and_build_code() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"_format":"hh-sol-artifact-1","contractName":"Events","abi":[],"bytecode":"0x6080","deployedBytecode":"0x"}}"#
        )
        .unwrap();

        let artifact = Artifact::load(file.path()).unwrap();
        assert_eq!(artifact.contract_name, "Events");

        let code = deploy_code(&artifact.creation_code().unwrap(), &[0x01, 0x02]);
        assert_eq!(code.as_ref(), &[0x60, 0x80, 0x01, 0x02]);
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let artifact = Artifact {
            contract_name: "IThing".to_string(),
            bytecode: "0x".to_string(),
        };
        assert!(matches!(artifact.creation_code(), Err(DeployError::Bytecode(_))));
    }
}
