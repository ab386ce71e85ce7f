pub mod odin;

use crate::keys::CredentialSource;
use crate::model::{SourceResult, Statistics};
use crate::session::Transport;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use self::odin::Odin;

/// A passive subdomain data source, driven by the aggregator.
pub trait Source: Send + Sync {
    fn name(&self) -> String;
    fn description(&self) -> String;

    /// Enabled when the user does not pick sources explicitly.
    fn is_default(&self) -> bool;
    fn has_recursive_support(&self) -> bool;
    fn needs_key(&self) -> bool;
    fn add_api_keys(&mut self, keys: Vec<String>);
    fn statistics(&self) -> Statistics;

    /// Spawns the enumeration and returns immediately. The stream ends when
    /// the source has nothing left to emit.
    fn run(
        &self,
        cancel: CancellationToken,
        domain: &str,
        session: Arc<dyn Transport>,
    ) -> ReceiverStream<SourceResult>;
}

pub fn all_sources(credentials: Arc<dyn CredentialSource>) -> Vec<Box<dyn Source>> {
    vec![Box::new(Odin::new(credentials))]
}

pub fn display_all(sources: &[Box<dyn Source>]) {
    println!("\nSubdomains sources");
    for source in sources {
        let mut flags = Vec::new();
        if source.is_default() {
            flags.push("default");
        }
        if source.has_recursive_support() {
            flags.push("recursive");
        }
        if source.needs_key() {
            flags.push("key");
        }
        println!(
            "- {:12}{:45}[{}]",
            source.name(),
            source.description(),
            flags.join(", ")
        );
    }
}
