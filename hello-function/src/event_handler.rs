use lambda_http::{Body, Error, Request, RequestExt, Response};
use tracing::info;

pub(crate) fn greeting(name: Option<&str>) -> String {
    let name = name.unwrap_or("world");
    format!("Hello, {name}! This is the vulnerableFunction.")
}

pub(crate) async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    info!("HTTP trigger function processed a request.");

    let params = event.query_string_parameters();
    let resp = Response::builder()
        .status(200)
        .header("content-type", "text/plain; charset=utf-8")
        .body(Body::from(greeting(params.first("name"))))
        .map_err(Box::new)?;

    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn body_text(body: &Body) -> &str {
        match body {
            Body::Text(text) => text,
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn greets_world_by_default() {
        assert_eq!(greeting(None), "Hello, world! This is the vulnerableFunction.");
    }

    #[test]
    fn greets_named_caller() {
        assert_eq!(greeting(Some("Ada")), "Hello, Ada! This is the vulnerableFunction.");
    }

    #[tokio::test]
    async fn reads_name_from_query() {
        let request = Request::new(Body::Empty).with_query_string_parameters(HashMap::from([(
            "name".to_string(),
            "Ada".to_string(),
        )]));
        let response = function_handler(request).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().len(), 1);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            body_text(response.body()),
            "Hello, Ada! This is the vulnerableFunction."
        );
    }

    #[tokio::test]
    async fn plain_request_gets_default_greeting() {
        let response = function_handler(Request::new(Body::Empty)).await.unwrap();

        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            body_text(response.body()),
            "Hello, world! This is the vulnerableFunction."
        );
    }
}
