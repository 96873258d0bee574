/// Claves de localStorage de la sesión (compartidas con las páginas HTML)
pub const STORAGE_KEY_CONNECTED: &str = "walletConnected";
pub const STORAGE_KEY_ADDRESS: &str = "userAddress";

/// Páginas de navegación
pub const CONNECT_PAGE_URL: &str = "index.html";
pub const DASHBOARD_PAGE_URL: &str = "dashboard.html";

/// Pools de staking publicados por el contrato
pub const POOL_COUNT: u64 = 3;

/// Decimales del token CLK
pub const TOKEN_DECIMALS: u8 = 18;
pub const TOKEN_SYMBOL: &str = "CLK";

/// Cantidad fija que acuña el faucet (solo texto, la fija el contrato)
pub const FAUCET_AMOUNT_LABEL: &str = "10,000 CLK";
