use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;

use procura_api::{Dispatcher, Invocation, Reply};
use procura_infra::{InMemoryLedger, LifecycleEngine, StoreConfig};

fn main() -> anyhow::Result<()> {
    procura_observability::init();

    let ledger = Arc::new(InMemoryLedger::new());
    let dispatcher = Dispatcher::new(LifecycleEngine::new(ledger, StoreConfig::from_env()));

    let config = dispatcher.engine().cache().config();
    tracing::info!(
        orders_key = %config.orders_key,
        inventory_key = %config.inventory_key,
        "starting procura invoker"
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read invocation from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Invocation>(&line) {
            Ok(inv) => Reply::from_result(dispatcher.dispatch(inv.class, &inv.function, &inv.args)),
            Err(e) => {
                tracing::warn!(error = %e, "malformed invocation");
                Reply::failure("bad_invocation", e.to_string())
            }
        };

        serde_json::to_writer(&mut stdout, &reply).context("failed to encode reply")?;
        stdout.write_all(b"\n").context("failed to write reply")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    Ok(())
}
