use std::net::SocketAddrV4;

/// Server configs
#[derive(Debug)]
pub(crate) struct ServerConfig {
    pub addr: SocketAddrV4,
    pub db_read_conn_str: String,
    pub db_write_conn_str: String,
    /// connections opened per pool
    pub pool_size: usize,
    /// HMAC key for issued user tokens
    pub secret_key: String,
}

impl ServerConfig {
    pub fn new(
        addr: SocketAddrV4,
        db_read_conn_str: String,
        db_write_conn_str: String,
        pool_size: usize,
        secret_key: String,
    ) -> Self {
        Self {
            addr,
            db_read_conn_str,
            db_write_conn_str,
            pool_size,
            secret_key,
        }
    }
}
