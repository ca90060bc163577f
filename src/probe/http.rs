//! HTTP surface probing. Expands the endpoint x credential matrix for one
//! target and drives it with semaphore-limited concurrency.

use std::net::Ipv4Addr;
use std::sync::Arc;

use futures::future::join_all;
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;

use super::SuccessfulConnection;
use crate::credentials::{Credential, CredentialStore};

/// Runs the endpoint x credential matrix for one target's HTTP surface.
/// The client is the target's shared session context; the global semaphore
/// caps in-flight probes across all targets of the run.
pub struct HttpProber {
    client: Client,
    port: u16,
    target_limit: usize,
    global_slots: Arc<Semaphore>,
}

impl HttpProber {
    pub fn new(
        client: Client,
        port: u16,
        target_limit: usize,
        global_slots: Arc<Semaphore>,
    ) -> Self {
        Self {
            client,
            port,
            target_limit,
            global_slots,
        }
    }

    /// Launch every (template, credential) combination and await them all.
    /// Nothing is cancelled on an early success: the whole matrix runs so
    /// every working combination is discovered. Completion order is
    /// unspecified; only successes are returned.
    pub async fn probe_matrix(
        &self,
        address: Ipv4Addr,
        templates: &[String],
        store: &CredentialStore,
    ) -> Vec<SuccessfulConnection> {
        let target_slots = Arc::new(Semaphore::new(self.target_limit));

        let mut tasks = Vec::with_capacity(templates.len() * (store.len() + 1));
        for path in templates {
            for credential in store.attempts() {
                tasks.push(self.check_url(
                    self.resolve_url(address, path),
                    credential,
                    target_slots.clone(),
                ));
            }
        }

        join_all(tasks).await.into_iter().flatten().collect()
    }

    fn resolve_url(&self, address: Ipv4Addr, path: &str) -> String {
        if self.port == 80 {
            format!("http://{address}{path}")
        } else {
            format!("http://{address}:{}{path}", self.port)
        }
    }

    /// One matrix cell: GET the resolved URL, with basic auth when a
    /// credential is present. Success means status 200 exactly; transport
    /// errors are logged and fold into failure without touching siblings.
    async fn check_url(
        &self,
        url: String,
        credential: Option<&Credential>,
        target_slots: Arc<Semaphore>,
    ) -> Option<SuccessfulConnection> {
        let _target_permit = target_slots.acquire().await.unwrap();
        let _global_permit = self.global_slots.acquire().await.unwrap();

        let mut request = self.client.get(&url);
        if let Some(credential) = credential {
            request = request.basic_auth(&credential.username, Some(&credential.password));
        }

        match request.send().await {
            Ok(response) if response.status() == StatusCode::OK => Some(SuccessfulConnection {
                url,
                credential: credential.cloned(),
            }),
            Ok(_) => None,
            Err(e) => {
                eprintln!("Error probing {url}: {e}");
                None
            }
        }
    }
}
