use futures::StreamExt;
use std::sync::Arc;
use subscraping::config::{ProviderConfig, SessionConfig};
use subscraping::keys::RandomKeyPicker;
use subscraping::model::{ResultKind, SubdomainLine};
use subscraping::session::{Session, Transport};
use subscraping::sources::{self, Source};
use subscraping::Result;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

#[tokio::main]
#[instrument(name = "enumerate", level = "info", skip_all)]
pub async fn enumerate(
    target: &str,
    providers: &ProviderConfig,
    session_config: &SessionConfig,
    json: bool,
) -> Result<()> {
    let session: Arc<dyn Transport> = Arc::new(Session::new(session_config)?);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing current requests");
            ctrl_c.cancel();
        }
    });

    let mut sources = sources::all_sources(Arc::new(RandomKeyPicker));
    for source in sources.iter_mut() {
        let keys = providers.keys_for(&source.name());
        source.add_api_keys(keys);
    }

    for source in sources.iter().filter(|source| source.is_default()) {
        run_source(source.as_ref(), &cancel, target, Arc::clone(&session), json).await;
    }

    Ok(())
}

async fn run_source(
    source: &dyn Source,
    cancel: &CancellationToken,
    target: &str,
    session: Arc<dyn Transport>,
    json: bool,
) {
    let mut results = source.run(cancel.clone(), target, session);
    while let Some(result) = results.next().await {
        match result.kind {
            ResultKind::Subdomain(host) if json => {
                let line = SubdomainLine {
                    source: &result.source,
                    host: &host,
                };
                match serde_json::to_string(&line) {
                    Ok(line) => println!("{}", line),
                    Err(err) => error!("{}: {}", result.source, err),
                }
            }
            ResultKind::Subdomain(host) => println!("{}", host),
            ResultKind::Error(err) => error!("{}: {}", result.source, err),
        }
    }

    let stats = source.statistics();
    if stats.skipped {
        info!("{}: skipped, no api key configured", source.name());
    } else {
        info!(
            "{}: {} results, {} errors in {:?}",
            source.name(),
            stats.results,
            stats.errors,
            stats.time_taken
        );
    }
}
