// ============================================================================
// CONTRACTS - Bindings tipados de ChronoLock (CLK) y Staking
// ============================================================================
// Las interfaces se declaran con `sol!`; el ABI JSON de `contracts.json` solo
// se usa para verificar que el contrato desplegado declara cada función que
// llamamos. Las llamadas se codifican en Rust y viajan por `eth_call` /
// `eth_sendTransaction` del provider inyectado.
// ============================================================================

use std::rc::Rc;
use std::str::FromStr;
use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::{sol, SolCall};
use serde_json::{json, Value};
use crate::errors::{DappError, DappResult};
use crate::models::contracts_config::{function_signatures, AbiItem};
use crate::models::staking::{StakePosition, StakingPool};
use crate::services::provider::Eip1193;

sol! {
    /// Posición tal como la devuelve `getStakes`
    #[derive(Debug, PartialEq, Eq)]
    struct Stake {
        uint256 amount;
        uint256 poolId;
        uint256 unlockTime;
        bool claimed;
    }

    /// Token ERC-20 con faucet
    #[derive(Debug)]
    interface IChronoLock {
        function mint(address to) external;
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Contrato de staking con pools de bloqueo fijo
    #[derive(Debug)]
    interface IStaking {
        function stakingPools(uint256 poolId) external view returns (uint256 duration, uint256 apr);
        function getStakes(address user) external view returns (Stake[] memory);
        function totalStaked() external view returns (uint256);
        function calculateReward(uint256 amount, uint256 poolId) external view returns (uint256);
        function stake(uint256 amount, uint256 poolId) external;
        function unstake(uint256 stakeIndex) external;
    }
}

/// Funciones que el dApp llama en ChronoLock
pub const CHRONOLOCK_REQUIRED: &[&str] = &[
    IChronoLock::mintCall::SIGNATURE,
    IChronoLock::balanceOfCall::SIGNATURE,
    IChronoLock::allowanceCall::SIGNATURE,
    IChronoLock::approveCall::SIGNATURE,
];

/// Funciones que el dApp llama en Staking
pub const STAKING_REQUIRED: &[&str] = &[
    IStaking::stakingPoolsCall::SIGNATURE,
    IStaking::getStakesCall::SIGNATURE,
    IStaking::totalStakedCall::SIGNATURE,
    IStaking::calculateRewardCall::SIGNATURE,
    IStaking::stakeCall::SIGNATURE,
    IStaking::unstakeCall::SIGNATURE,
];

/// Parsea una dirección hex; la dirección cero no es un contrato válido
pub fn parse_address(raw: &str) -> Result<Address, String> {
    let address = Address::from_str(raw.trim()).map_err(|e| format!("malformed address {:?}: {}", raw, e))?;
    if address == Address::ZERO {
        return Err("zero address".to_string());
    }
    Ok(address)
}

/// Dirección + descripción de interfaz ya validadas
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractBinding {
    pub name: &'static str,
    pub address: Address,
}

impl ContractBinding {
    /// Valida dirección y que el ABI declare todas las firmas requeridas
    pub fn bind(name: &'static str, address: &str, abi: &[AbiItem], required: &[&str]) -> DappResult<Self> {
        let fail = |reason: String| DappError::ContractBindFailed { contract: name, reason };

        let address = parse_address(address).map_err(fail)?;

        if abi.is_empty() {
            return Err(fail("empty ABI".to_string()));
        }
        let declared = function_signatures(abi);
        if let Some(missing) = required.iter().find(|sig| !declared.iter().any(|d| d == *sig)) {
            return Err(fail(format!("ABI does not declare {}", missing)));
        }

        log::info!("🔗 [BIND] {} ligado en {}", name, address);
        Ok(Self { name, address })
    }
}

/// Petición de transacción lista para `eth_sendTransaction`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Vec<u8>,
    /// Etiqueta para logs ("mint", "approve", ...)
    pub label: &'static str,
}

impl TransactionRequest {
    pub fn to_json(&self) -> Value {
        json!({
            "from": self.from.to_string(),
            "to": self.to.to_string(),
            "data": hex::encode_prefixed(&self.data),
        })
    }
}

/// Decodifica el resultado hex de `eth_call`
pub fn decode_hex_result(value: &Value) -> Result<Vec<u8>, String> {
    let raw = value.as_str().ok_or_else(|| format!("expected hex string, got {}", value))?;
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits).map_err(|e| format!("invalid hex: {}", e))
}

/// Handle de contrato ligado al signer de la sesión
pub struct ContractHandle<P> {
    binding: ContractBinding,
    signer: Address,
    provider: Rc<P>,
}

impl<P> Clone for ContractHandle<P> {
    fn clone(&self) -> Self {
        Self {
            binding: self.binding.clone(),
            signer: self.signer,
            provider: self.provider.clone(),
        }
    }
}

impl<P: Eip1193> ContractHandle<P> {
    pub fn new(binding: ContractBinding, signer: Address, provider: Rc<P>) -> Self {
        Self { binding, signer, provider }
    }

    pub fn address(&self) -> Address {
        self.binding.address
    }

    /// Lectura `eth_call` contra el bloque "latest"
    pub async fn call<C: SolCall>(&self, call: C) -> DappResult<C::Return> {
        let params = json!([
            {
                "from": self.signer.to_string(),
                "to": self.binding.address.to_string(),
                "data": hex::encode_prefixed(call.abi_encode()),
            },
            "latest"
        ]);

        let method = C::SIGNATURE;
        let raw = self
            .provider
            .request("eth_call", params)
            .await
            .map_err(|e| DappError::read_failed(method, e))?;
        let bytes = decode_hex_result(&raw).map_err(|e| DappError::read_failed(method, e))?;
        if bytes.is_empty() {
            // eth_call a una dirección sin código devuelve "0x"
            return Err(DappError::read_failed(method, format!("empty response from {}", self.binding.name)));
        }
        C::abi_decode_returns(&bytes, false).map_err(|e| DappError::read_failed(method, e))
    }

    /// Construye la transacción (no la envía)
    pub fn transaction<C: SolCall>(&self, call: C, label: &'static str) -> TransactionRequest {
        TransactionRequest {
            from: self.signer,
            to: self.binding.address,
            data: call.abi_encode(),
            label,
        }
    }
}

/// Token ChronoLock (CLK)
pub struct ChronoLockContract<P> {
    handle: ContractHandle<P>,
}

impl<P: Eip1193> ChronoLockContract<P> {
    pub fn new(handle: ContractHandle<P>) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    pub async fn balance_of(&self, account: Address) -> DappResult<U256> {
        Ok(self.handle.call(IChronoLock::balanceOfCall { account }).await?._0)
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> DappResult<U256> {
        Ok(self.handle.call(IChronoLock::allowanceCall { owner, spender }).await?._0)
    }

    pub fn mint(&self, to: Address) -> TransactionRequest {
        self.handle.transaction(IChronoLock::mintCall { to }, "mint")
    }

    pub fn approve(&self, spender: Address, amount: U256) -> TransactionRequest {
        self.handle.transaction(IChronoLock::approveCall { spender, amount }, "approve")
    }
}

/// Contrato de staking
pub struct StakingContract<P> {
    handle: ContractHandle<P>,
}

impl<P: Eip1193> StakingContract<P> {
    pub fn new(handle: ContractHandle<P>) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    pub async fn pool(&self, pool_id: u64) -> DappResult<StakingPool> {
        let ret = self
            .handle
            .call(IStaking::stakingPoolsCall { poolId: U256::from(pool_id) })
            .await?;
        Ok(StakingPool {
            id: pool_id,
            duration: ret.duration,
            apr: ret.apr,
        })
    }

    pub async fn stakes_of(&self, user: Address) -> DappResult<Vec<StakePosition>> {
        let ret = self.handle.call(IStaking::getStakesCall { user }).await?;
        Ok(ret
            ._0
            .into_iter()
            .enumerate()
            .map(|(index, s)| StakePosition {
                index,
                amount: s.amount,
                pool_id: s.poolId,
                unlock_time: s.unlockTime,
                claimed: s.claimed,
            })
            .collect())
    }

    pub async fn total_staked(&self) -> DappResult<U256> {
        Ok(self.handle.call(IStaking::totalStakedCall {}).await?._0)
    }

    /// Recompensa calculada por el contrato (autoritativa)
    pub async fn calculate_reward(&self, amount: U256, pool_id: u64) -> DappResult<U256> {
        Ok(self
            .handle
            .call(IStaking::calculateRewardCall { amount, poolId: U256::from(pool_id) })
            .await?
            ._0)
    }

    pub fn stake(&self, amount: U256, pool_id: u64) -> TransactionRequest {
        self.handle.transaction(
            IStaking::stakeCall { amount, poolId: U256::from(pool_id) },
            "stake",
        )
    }

    pub fn unstake(&self, stake_index: usize) -> TransactionRequest {
        self.handle.transaction(
            IStaking::unstakeCall { stakeIndex: U256::from(stake_index) },
            "unstake",
        )
    }
}
