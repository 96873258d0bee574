// ============================================================================
// CONTRACTS CONFIG - Documento `contracts.json` (ABIs en formato JSON)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Contenido de `contracts.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractsConfig {
    #[serde(rename = "chronoLockABI")]
    pub chronolock_abi: Vec<AbiItem>,
    #[serde(rename = "stakingABI")]
    pub staking_abi: Vec<AbiItem>,
}

/// Entrada de un ABI JSON de Solidity (solo lo necesario para firmas)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbiItem {
    #[serde(rename = "type", default = "default_item_type")]
    pub item_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(default)]
    pub components: Vec<AbiParam>,
}

// Los ABIs antiguos omiten "type" en funciones
fn default_item_type() -> String {
    "function".to_string()
}

impl AbiParam {
    /// Tipo canónico: las tuplas se expanden a `(t1,t2)` con su sufijo de array
    pub fn canonical_type(&self) -> String {
        match self.param_type.strip_prefix("tuple") {
            Some(suffix) => {
                let inner: Vec<String> = self.components.iter().map(AbiParam::canonical_type).collect();
                format!("({}){}", inner.join(","), suffix)
            }
            None => self.param_type.clone(),
        }
    }
}

impl AbiItem {
    /// Firma canónica `name(t1,t2)` para funciones; `None` para eventos, etc.
    pub fn function_signature(&self) -> Option<String> {
        if self.item_type != "function" {
            return None;
        }
        let name = self.name.as_deref()?;
        let inputs: Vec<String> = self.inputs.iter().map(AbiParam::canonical_type).collect();
        Some(format!("{}({})", name, inputs.join(",")))
    }
}

/// Firmas de todas las funciones declaradas en un ABI
pub fn function_signatures(abi: &[AbiItem]) -> Vec<String> {
    abi.iter().filter_map(AbiItem::function_signature).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contracts_json_and_builds_signatures() {
        let json = r#"{
            "chronoLockABI": [
                {"type":"function","name":"approve","inputs":[{"name":"spender","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"type":"bool"}]},
                {"type":"event","name":"Transfer","inputs":[{"type":"address"},{"type":"address"},{"type":"uint256"}]}
            ],
            "stakingABI": [
                {"name":"stakeMany","inputs":[{"type":"tuple[]","components":[{"type":"uint256"},{"type":"uint256"}]}]}
            ]
        }"#;
        let config: ContractsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(function_signatures(&config.chronolock_abi), vec!["approve(address,uint256)"]);
        assert_eq!(function_signatures(&config.staking_abi), vec!["stakeMany((uint256,uint256)[])"]);
    }

    #[test]
    fn missing_abi_key_is_rejected() {
        let json = r#"{"chronoLockABI": []}"#;
        assert!(serde_json::from_str::<ContractsConfig>(json).is_err());
    }
}
