// ============================================================================
// TESTING - Dobles de prueba (provider, storage, navegación, config)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use alloy_primitives::{address, hex, Address};
use alloy_sol_types::SolCall;
use serde_json::{json, Value};
use crate::config::AppConfig;
use crate::errors::{DappError, DappResult, ProviderError};
use crate::models::contracts_config::{AbiItem, AbiParam, ContractsConfig};
use crate::models::session::WalletSession;
use crate::services::config_service::ConfigSource;
use crate::services::contracts::{
    parse_address, ChronoLockContract, ContractBinding, ContractHandle, StakingContract,
    CHRONOLOCK_REQUIRED, STAKING_REQUIRED,
};
use crate::services::provider::Eip1193;
use crate::state::SessionContext;
use crate::utils::navigation::Navigator;
use crate::utils::storage::KeyValueStore;

pub const USER: Address = address!("1111111111111111111111111111111111111111");

type Scripted = Result<Value, ProviderError>;

/// Provider EIP-1193 con respuestas programadas por método.
/// La última respuesta de cada cola se repite; `eth_call` se programa por selector.
#[derive(Default)]
pub struct MockProvider {
    responses: RefCell<HashMap<String, VecDeque<Scripted>>>,
    calls: RefCell<Vec<(String, Value)>>,
    sleeps: Cell<u32>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider en la red BSC (0x38)
    pub fn on_bsc() -> Self {
        let provider = Self::new();
        provider.respond("eth_chainId", Ok(json!("0x38")));
        provider.respond("eth_accounts", Ok(json!([USER.to_string()])));
        provider
    }

    pub fn respond(&self, method: &str, response: Scripted) -> &Self {
        self.responses
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn respond_call<C: SolCall>(&self, encoded_return: Vec<u8>) -> &Self {
        self.respond_call_raw::<C>(Ok(Value::String(hex::encode_prefixed(encoded_return))))
    }

    pub fn respond_call_raw<C: SolCall>(&self, response: Scripted) -> &Self {
        let key = format!("eth_call:{}", hex::encode_prefixed(C::SELECTOR));
        self.respond(&key, response)
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|(m, _)| m == method).count()
    }

    /// Número de llamadas `eth_call` a una función concreta
    pub fn count_calls_to<C: SolCall>(&self) -> usize {
        let selector = hex::encode_prefixed(C::SELECTOR);
        self.calls
            .borrow()
            .iter()
            .filter(|(m, p)| m == "eth_call" && call_selector(p).as_deref() == Some(selector.as_str()))
            .count()
    }

    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

fn call_selector(params: &Value) -> Option<String> {
    let data = params.get(0)?.get("data")?.as_str()?;
    data.get(..10).map(str::to_string)
}

impl Eip1193 for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls.borrow_mut().push((method.to_string(), params.clone()));

        let key = if method == "eth_call" {
            format!("eth_call:{}", call_selector(&params).unwrap_or_default())
        } else {
            method.to_string()
        };

        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(Ok(Value::Null)),
            Some(queue) => queue.front().cloned().unwrap_or(Ok(Value::Null)),
            None => Err(ProviderError::new(-32601, format!("unmocked {}", key))),
        }
    }

    async fn sleep(&self, _ms: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
    }
}

/// localStorage en memoria
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationEvent {
    Redirect(String),
    Reload,
}

/// Registra las navegaciones en lugar de ejecutarlas
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: RefCell<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, url: &str) {
        self.events.borrow_mut().push(NavigationEvent::Redirect(url.to_string()));
    }

    fn reload(&self) {
        self.events.borrow_mut().push(NavigationEvent::Reload);
    }
}

/// Config fija (o error fijo) en lugar de fetch HTTP
pub struct StaticConfigSource {
    result: DappResult<ContractsConfig>,
    loads: Cell<u32>,
}

impl StaticConfigSource {
    pub fn complete() -> Self {
        Self {
            result: Ok(ContractsConfig {
                chronolock_abi: abi_for(CHRONOLOCK_REQUIRED),
                staking_abi: abi_for(STAKING_REQUIRED),
            }),
            loads: Cell::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(DappError::ConfigLoadFailed(reason.to_string())),
            loads: Cell::new(0),
        }
    }

    pub fn loads(&self) -> u32 {
        self.loads.get()
    }
}

impl ConfigSource for StaticConfigSource {
    async fn load(&self) -> DappResult<ContractsConfig> {
        self.loads.set(self.loads.get() + 1);
        self.result.clone()
    }
}

/// ABI JSON mínimo que declara las firmas dadas (`name(t1,t2)`)
pub fn abi_for(signatures: &[&str]) -> Vec<AbiItem> {
    signatures
        .iter()
        .map(|sig| {
            let (name, rest) = sig.split_once('(').unwrap_or((sig, ")"));
            let args = rest.trim_end_matches(')');
            let inputs = args
                .split(',')
                .filter(|a| !a.is_empty())
                .map(|a| AbiParam { param_type: a.to_string(), components: Vec::new() })
                .collect();
            AbiItem {
                item_type: "function".to_string(),
                name: Some(name.to_string()),
                inputs,
            }
        })
        .collect()
}

/// Contexto de sesión ya ligado para `USER`, sin pasar por el bootstrap
pub fn session_context(provider: Rc<MockProvider>, config: AppConfig) -> SessionContext<MockProvider> {
    let token = ContractBinding {
        name: "ChronoLock",
        address: parse_address(&config.chronolock_address).unwrap(),
    };
    let staking = ContractBinding {
        name: "Staking",
        address: parse_address(&config.staking_address).unwrap(),
    };
    SessionContext {
        session: WalletSession::connected(USER.to_string()),
        signer: USER,
        token: ChronoLockContract::new(ContractHandle::new(token, USER, provider.clone())),
        staking: StakingContract::new(ContractHandle::new(staking, USER, provider.clone())),
        provider,
        config,
    }
}
