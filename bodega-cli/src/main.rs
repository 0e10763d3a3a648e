use std::io;

use bodega_store::{Config, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bodega_cli=info,bodega_store=info".into()),
        )
        // Logs go to stderr; stdout belongs to the menu
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::load()?;
    let products = config.catalog.build()?;
    tracing::info!(
        store = %config.store.name,
        products = products.len(),
        "catalog loaded"
    );

    let mut store = Store::new(products);

    let stdin = io::stdin();
    let stdout = io::stdout();
    bodega_cli::menu::run(&mut store, &mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
