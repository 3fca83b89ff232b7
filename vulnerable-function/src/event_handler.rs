use lambda_http::{Body, Error, Request, RequestExt, Response};
use serde::Serialize;
use tracing::{error, info};

use crate::config::ConfigProvider;
use crate::decode::{decode_body, prefix};
use crate::params::Params;

const SECRET_VALUE: &str = "hardcoded_secret_example";

const DEFAULT_USER: &str = "defaultUser";
const DEFAULT_ACTION: &str = "view";
const DEFAULT_API_KEY: &str = "dummy_key_not_set";

/// The parts of an inbound HTTP request the handler looks at.
#[derive(Debug, Default, Clone)]
pub struct Invocation {
    pub method: String,
    pub url: String,
    pub params: Params,
    pub headers: Params,
    pub body: Vec<u8>,
}

impl From<&Request> for Invocation {
    fn from(event: &Request) -> Self {
        let mut params = Params::new();
        for (key, value) in event.query_string_parameters().iter() {
            if params.get(key).is_none() {
                params.insert(key, value);
            }
        }

        let mut headers = Params::new();
        for name in event.headers().keys() {
            let joined = event
                .headers()
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            headers.insert(name.as_str(), joined);
        }

        let body: &[u8] = event.body().as_ref();

        Invocation {
            method: event.method().to_string(),
            url: event.uri().to_string(),
            params,
            headers,
            body: body.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: Params,
    pub body: String,
}

#[derive(Serialize)]
struct EchoedInput<'a> {
    method: &'a str,
    url: &'a str,
    params: &'a Params,
    headers: &'a Params,
}

#[derive(Serialize)]
struct Payload<'a> {
    message: String,
    input: EchoedInput<'a>,
}

/// Processes one invocation. Body decode failures are logged and swallowed;
/// the response is always a 200 with a JSON echo of the request.
pub fn handle(
    request: &Invocation,
    config: &dyn ConfigProvider,
) -> Result<HandlerResponse, serde_json::Error> {
    info!("HTTP trigger function processed a request.");

    let user_id = request.params.get_or("user_id", DEFAULT_USER);
    info!("Processing request for user: {user_id}");

    let api_key = config.get_or("API_KEY", DEFAULT_API_KEY);
    info!("Using API Key (example): {}...", prefix(&api_key, 4));

    info!("Using hardcoded value (example): {}...", prefix(SECRET_VALUE, 4));

    // No allow-list and no authorization check.
    let action = request.params.get_or("action", DEFAULT_ACTION);
    if action == "delete" {
        info!("Simulating delete action (vulnerable pattern)");
    }

    if !request.body.is_empty() {
        match decode_body(&request.body) {
            Ok(decoded) => info!("Decoded data: {}...", prefix(&decoded, 50)),
            Err(e) => error!("Failed to decode body: {e}"),
        }
    }

    let payload = Payload {
        message: format!("Processed action '{action}' for user '{user_id}'."),
        input: EchoedInput {
            method: &request.method,
            url: &request.url,
            params: &request.params,
            headers: &request.headers,
        },
    };
    let body = serde_json::to_string(&payload)?;

    let mut headers = Params::new();
    headers.insert("Content-Type", "application/json");

    Ok(HandlerResponse {
        status_code: 200,
        headers,
        body,
    })
}

pub(crate) async fn function_handler(
    config: &dyn ConfigProvider,
    event: Request,
) -> Result<Response<Body>, Error> {
    let invocation = Invocation::from(&event);
    let response = handle(&invocation, config)?;

    let mut builder = Response::builder().status(response.status_code);
    for (name, value) in response.headers.iter() {
        builder = builder.header(name, value);
    }
    let resp = builder
        .body(Body::from(response.body))
        .map_err(Box::new)?;

    Ok(resp)
}
