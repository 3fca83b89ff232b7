use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::Rng;
use serde_json::{json, Value};

pub const ACTIONS: [&str; 3] = ["view", "edit", "delete"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Empty,
    Encoded,
    Garbage,
}

impl BodyKind {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => BodyKind::Empty,
            1 => BodyKind::Encoded,
            _ => BodyKind::Garbage,
        }
    }

    pub fn body(self, user_id: &str) -> String {
        match self {
            BodyKind::Empty => String::new(),
            BodyKind::Encoded => STANDARD.encode(format!("note from {user_id}: remember to rotate keys")),
            BodyKind::Garbage => "***not-base64***".to_string(),
        }
    }
}

/// Builds an API Gateway HTTP API (payload format 2.0) event.
pub fn http_api_event(user_id: &str, action: &str, body: &str) -> Value {
    let raw_query = format!("user_id={user_id}&action={action}");

    json!({
        "version": "2.0",
        "routeKey": "$default",
        "rawPath": "/anything",
        "rawQueryString": raw_query,
        "headers": {
            "content-type": "text/plain",
            "host": "invoke-test.local",
            "user-agent": "invoke-test"
        },
        "queryStringParameters": {
            "user_id": user_id,
            "action": action
        },
        "requestContext": {
            "accountId": "123456789012",
            "apiId": "invoke-test",
            "domainName": "invoke-test.local",
            "domainPrefix": "invoke-test",
            "http": {
                "method": "POST",
                "path": "/anything",
                "protocol": "HTTP/1.1",
                "sourceIp": "127.0.0.1",
                "userAgent": "invoke-test"
            },
            "requestId": "invoke-test",
            "routeKey": "$default",
            "stage": "$default",
            "time": "19/Oct/2026:00:00:00 +0000",
            "timeEpoch": 0
        },
        "body": body,
        "isBase64Encoded": false
    })
}
