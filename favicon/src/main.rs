use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::favicon::{FaviconMetadata, FaviconProcessor};

mod favicon;

fn main() {
    // Set up logging using tracing, status lines are shown unless RUST_LOG says otherwise
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(
        "{} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let metadata = match FaviconMetadata::builtin() {
        Ok(v) => v,
        Err(err) => {
            tracing::error!("Failed to load favicon metadata: {}", err);
            return;
        }
    };

    let processor = FaviconProcessor::new(metadata);
    tracing::info!(
        "Regenerating favicons from {}...",
        processor.metadata().source.display()
    );

    match processor.generate() {
        Ok(outputs) => {
            for (name, path) in outputs.iter() {
                tracing::debug!("Output {} -> {}", name, path.display());
            }
            tracing::info!("Generated {} favicon sizes", outputs.len());

            let primary = format!("png-{}", processor.metadata().primary_size);
            if let Ok(path) = outputs.get_output(&primary) {
                tracing::info!("Primary favicon written to {}", path.display());
            }
        }
        Err(err) => tracing::error!("Failed to generate favicons: {}", err),
    }

    // The icon is packed from whatever made it to disk, even after a failed run
    match processor.package() {
        Ok(outputs) => match outputs.get_output("ico") {
            Ok(path) => tracing::info!("Created {}", path.display()),
            Err(_) => tracing::warn!(
                "No icon frames found, {} not written",
                processor.metadata().ico_path().display()
            ),
        },
        Err(err) => tracing::error!("Failed to create icon: {}", err),
    }

    tracing::info!("Favicon regeneration finished");
}
