use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, once.
///
/// Does nothing unless `GRAFT_LOG` (or, failing that, `RUST_LOG`) holds a
/// filter. `GRAFT_LOG_TREE=1` prints spans as an indented tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = std::env::var("GRAFT_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
        else {
            return;
        };
        let registry = tracing_subscriber::registry().with(EnvFilter::new(directives));

        if std::env::var("GRAFT_LOG_TREE").is_ok_and(|v| v == "1") {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .init();
        }
    });
}
