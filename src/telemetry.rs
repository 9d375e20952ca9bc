use crate::configuration::LogFormat;
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// Builds the process subscriber. `RUST_LOG` wins over `env_filter` when set.
pub fn get_subscriber<Sink>(
    name: impl Into<String>,
    env_filter: impl Into<String>,
    sink: Sink,
    format: LogFormat,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter.into()));
    let (pretty_layer, bunyan_layer) = match format {
        LogFormat::Pretty => (
            Some(
                tracing_subscriber::fmt::Layer::new()
                    .with_writer(sink)
                    .with_target(false)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_ansi(true)
                    .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339()),
            ),
            None,
        ),
        LogFormat::Bunyan => (None, Some(BunyanFormattingLayer::new(name.into(), sink))),
    };
    let storage_layer = bunyan_layer.as_ref().map(|_| JsonStorageLayer);
    Registry::default()
        .with(env_filter)
        .with(storage_layer)
        .with(bunyan_layer)
        .with(pretty_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("Failed to initialize logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
