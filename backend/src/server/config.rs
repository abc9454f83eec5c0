//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use vehicle_catalogue::domain::DEFAULT_MAX_PAGE_SIZE;
use vehicle_catalogue::domain::ports::ConfiguredLoginService;
use vehicle_catalogue::inbound::http::session_config::SessionSettings;
use vehicle_catalogue::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) login: ConfiguredLoginService,
    pub(crate) max_page_size: u64,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration serving the in-memory demo catalogue.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, login: ConfiguredLoginService) -> Self {
        Self {
            session,
            bind_addr,
            login,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            db_pool: None,
        }
    }

    /// Attach a database connection pool; vehicles are then read from
    /// PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.max_page_size = max_page_size;
        self
    }
}
