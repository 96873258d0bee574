// ============================================================================
// SESSION SERVICE - Persistencia de la sesión del wallet (localStorage)
// ============================================================================
// Dos claves de texto: flag de conexión + dirección. Se leen en cada carga
// de página y solo se escriben en connect/disconnect.
// ============================================================================

use crate::models::session::WalletSession;
use crate::utils::constants::{STORAGE_KEY_ADDRESS, STORAGE_KEY_CONNECTED};
use crate::utils::storage::KeyValueStore;

pub struct SessionService<S> {
    store: S,
}

impl<S: KeyValueStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Sesión persistida; `None` si falta cualquiera de las dos claves
    pub fn load(&self) -> Option<WalletSession> {
        let connected = self.store.get_item(STORAGE_KEY_CONNECTED)?;
        if connected != "true" {
            return None;
        }
        let address = self.store.get_item(STORAGE_KEY_ADDRESS)?;
        if address.trim().is_empty() {
            return None;
        }
        Some(WalletSession::connected(address))
    }

    pub fn is_connected(&self) -> bool {
        self.load().is_some()
    }

    pub fn save(&self, session: &WalletSession) -> Result<(), String> {
        self.store.set_item(STORAGE_KEY_CONNECTED, if session.connected { "true" } else { "false" })?;
        self.store.set_item(STORAGE_KEY_ADDRESS, &session.address)?;
        log::info!("💾 [SESSION] Sesión guardada para {}", session.short_address());
        Ok(())
    }

    /// Borra ambas claves; intenta las dos aunque la primera falle
    pub fn clear(&self) -> Result<(), String> {
        let flag = self.store.remove_item(STORAGE_KEY_CONNECTED);
        let address = self.store.remove_item(STORAGE_KEY_ADDRESS);
        log::info!("🗑️ [SESSION] Sesión eliminada");
        flag.and(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[test]
    fn save_then_load() {
        let service = SessionService::new(MemoryStore::new());
        service.save(&WalletSession::connected("0xabc")).unwrap();
        assert_eq!(service.load(), Some(WalletSession::connected("0xabc")));
    }

    #[test]
    fn flag_without_address_is_not_a_session() {
        let store = MemoryStore::new();
        store.set_item(STORAGE_KEY_CONNECTED, "true").unwrap();
        assert!(!SessionService::new(store).is_connected());
    }

    #[test]
    fn address_without_true_flag_is_not_a_session() {
        let store = MemoryStore::new();
        store.set_item(STORAGE_KEY_CONNECTED, "1").unwrap();
        store.set_item(STORAGE_KEY_ADDRESS, "0xabc").unwrap();
        assert!(SessionService::new(store).load().is_none());
    }

    #[test]
    fn clear_removes_both_keys() {
        let service = SessionService::new(MemoryStore::new());
        service.save(&WalletSession::connected("0xabc")).unwrap();
        service.clear().unwrap();
        assert!(service.store.is_empty());
    }
}
