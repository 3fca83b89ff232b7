use lambda_http::{run, service_fn, tracing, Error};

mod config;
mod decode;
mod event_handler;
mod params;

use config::EnvConfig;
use event_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // API_KEY is looked up from the environment on every invocation.
    let config = EnvConfig;

    run(service_fn(move |event| async move {
        function_handler(&config, event).await
    }))
    .await
}
