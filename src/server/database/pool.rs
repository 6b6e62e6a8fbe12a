use crate::server::database::connection::Connection;
#[cfg(test)]
use crate::server::database::mock::MockClient;
use anyhow::{Context, Error};
use log::{error, info};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinSet;
use tokio::time;
use tokio_postgres::Client;

pub(crate) struct CommonPool<M> {
    /// pool name, only used in logs
    name: String,
    /// idle connections, handed out in a FIFO manner
    connections: Mutex<VecDeque<M>>,
    /// signalled whenever a connection is handed back
    released: Notify,
}

pub(crate) struct Pool<M>(Arc<CommonPool<M>>);

impl<M> Clone for Pool<M> {
    fn clone(&self) -> Pool<M> {
        Pool(self.0.clone())
    }
}

pub(crate) mod connect_util {
    use anyhow::{Context, Error};
    use log::error;
    use tokio_postgres::{Client, NoTls};

    pub async fn connect(str: &str) -> Result<Client, Error> {
        let (client, conn) = tokio_postgres::connect(str, NoTls)
            .await
            .context("failed to create connection")?;
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                error!("connection returned error and aborted, {}", e);
            }
        });
        Ok(client)
    }
}

pub(crate) trait Init {
    async fn init(&mut self, conn_str: String, size: usize) -> Result<(), Error>;
}

impl Init for Pool<Client> {
    async fn init(&mut self, conn_str: String, size: usize) -> Result<(), Error> {
        let mut clients: VecDeque<Client> = VecDeque::with_capacity(size);
        let mut set = JoinSet::new();
        for _ in 0..size {
            let str = conn_str.clone();
            set.spawn(async move { connect_util::connect(str.as_str()).await });
        }
        while let Some(res) = set.join_next().await {
            let client = res.context("connection task panicked")??;
            info!("pool={} connection created", self.0.name);
            clients.push_back(client);
        }
        self.lock().append(&mut clients);
        self.0.released.notify_waiters();
        info!("pool={} ready with {} connections", self.0.name, self.idle());
        Ok(())
    }
}

#[cfg(test)]
impl Init for Pool<MockClient> {
    async fn init(&mut self, _: String, size: usize) -> Result<(), Error> {
        let mut guard = self.lock();
        for _ in 0..size {
            guard.push_back(MockClient::new([]));
        }
        Ok(())
    }
}

impl<M> Pool<M> {
    pub const DEFAULT_SIZE: usize = 10;

    /// create an empty pool, filled by [`Init::init`]
    pub fn new(name: &str) -> Self {
        Self(Arc::new(CommonPool {
            name: name.to_string(),
            connections: Mutex::new(VecDeque::with_capacity(Self::DEFAULT_SIZE)),
            released: Notify::new(),
        }))
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<M>> {
        self.0.connections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// number of idle connections
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    /// acquire a connection, waiting for one to be released up to `timeout`.
    pub async fn acquire(&self, timeout: Duration) -> Option<Connection<M>> {
        let wait = async {
            loop {
                let released = self.0.released.notified();
                let next = self.lock().pop_front();
                if let Some(client) = next {
                    return client;
                }
                released.await;
            }
        };
        match time::timeout(timeout, wait).await {
            Ok(client) => Some(Connection::new(client, self.clone())),
            Err(_) => {
                error!("pool={} timed out to acquire a connection after {:?}", self.0.name, timeout);
                None
            }
        }
    }

    pub fn release(&self, client: M) {
        self.lock().push_back(client);
        self.0.released.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(20);

    #[tokio::test]
    async fn test_new() {
        let pool = Pool::<MockClient>::new("read");
        assert_eq!(pool.idle(), 0);
        assert!(pool.acquire(SHORT).await.is_none());
    }

    #[tokio::test]
    async fn test_acquire_and_release() {
        let mut pool = Pool::<MockClient>::new("write");
        pool.init("conn_str".to_string(), 1).await.unwrap();
        {
            let _conn = match pool.acquire(SHORT).await {
                Some(conn) => conn,
                None => panic!("should get some"),
            };
            assert!(pool.acquire(SHORT).await.is_none());
        } // conn drops here, and is released automatically

        assert!(pool.acquire(SHORT).await.is_some());
        assert_eq!(pool.idle(), 1);
    }

    #[tokio::test]
    async fn waiter_is_woken_by_release() {
        let mut pool = Pool::<MockClient>::new("write");
        pool.init("conn_str".to_string(), 1).await.unwrap();
        let held = pool.acquire(SHORT).await.unwrap();
        let waiter = {
            let pool = pool.clone();
            tokio::spawn(async move { pool.acquire(Duration::from_secs(5)).await.is_some() })
        };
        tokio::task::yield_now().await;
        drop(held);
        assert!(waiter.await.unwrap());
    }
}
