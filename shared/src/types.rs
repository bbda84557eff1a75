use std::collections::HashMap;

use base64::Engine;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// A stored student record, as the table returns it
pub type Item = serde_json::Map<String, Value>;

// ========== REQUEST ==========
/// Inbound API Gateway proxy event, reduced to the fields routing needs.
///
/// Only `httpMethod` and `path` are typed here. The rest stay raw JSON and are
/// checked by the handler that reads them, so a route never fails on a field it ignores.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<Value>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub is_base64_encoded: Option<Value>,
}

impl RequestDescriptor {
    pub fn query_param(&self, name: &str) -> Result<&str, ApiError> {
        let missing = || ApiError::Internal(format!("Missing query parameter: {}", name));

        let params = match &self.query_string_parameters {
            None | Some(Value::Null) => return Err(missing()),
            Some(Value::Object(params)) => params,
            Some(_) => {
                return Err(ApiError::Internal(
                    "queryStringParameters must be a mapping".to_string(),
                ))
            }
        };

        match params.get(name) {
            Some(Value::String(value)) => Ok(value.as_str()),
            Some(_) => Err(ApiError::Internal(format!(
                "Query parameter {} must be a string",
                name
            ))),
            None => Err(missing()),
        }
    }

    /// Parse the body as a JSON object. Every failure here is an internal fault, not a bad request.
    pub fn json_body(&self) -> Result<Item, ApiError> {
        let raw = match &self.body {
            None | Some(Value::Null) => {
                return Err(ApiError::Internal("Request body not provided".to_string()))
            }
            Some(Value::String(raw)) => raw,
            Some(_) => {
                return Err(ApiError::Internal(
                    "Request body must be a string".to_string(),
                ))
            }
        };

        let value: Value = if self.body_is_base64()? {
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(raw)
                .map_err(|e| ApiError::Internal(format!("Invalid base64 body: {}", e)))?;
            serde_json::from_slice(&decoded)?
        } else {
            serde_json::from_str(raw)?
        };

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ApiError::Internal(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    fn body_is_base64(&self) -> Result<bool, ApiError> {
        match &self.is_base64_encoded {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(encoded)) => Ok(*encoded),
            Some(_) => Err(ApiError::Internal(
                "isBase64Encoded must be a boolean".to_string(),
            )),
        }
    }
}

// ========== RESPONSE ==========
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescriptor {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ResponseDescriptor {
    pub fn json(status: StatusCode, value: &Value) -> Self {
        let headers = HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);

        Self {
            status_code: status.as_u16(),
            headers,
            body: value.to_string(),
        }
    }
}

// ========== STUDENT PAYLOADS ==========
#[derive(Debug, Serialize)]
pub struct StudentCreated<'a> {
    pub message: &'static str,
    pub student: &'a Item,
}

#[derive(Debug, Serialize)]
pub struct StudentUpdated<'a> {
    pub message: &'static str,
    pub studentid: &'a str,
    pub updated_fields: &'a Item,
}

#[derive(Debug, Serialize)]
pub struct StudentDeleted<'a> {
    pub message: &'static str,
    pub studentid: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_proxy_event_fields() {
        let event = json!({
            "httpMethod": "PUT",
            "path": "/student",
            "queryStringParameters": { "studentid": "S1" },
            "body": "{\"fname\":\"Ada\"}",
            "requestContext": { "stage": "prod" }
        });
        let req: RequestDescriptor = serde_json::from_value(event).unwrap();

        assert_eq!(req.http_method.as_deref(), Some("PUT"));
        assert_eq!(req.query_param("studentid").unwrap(), "S1");
        assert_eq!(req.json_body().unwrap()["fname"], "Ada");
    }

    #[test]
    fn null_query_parameters_are_absent() {
        let req: RequestDescriptor =
            serde_json::from_value(json!({ "httpMethod": "DELETE", "queryStringParameters": null }))
                .unwrap();
        assert_eq!(
            req.query_param("studentid"),
            Err(ApiError::Internal("Missing query parameter: studentid".into()))
        );
    }

    #[test]
    fn decodes_base64_body() {
        let req = RequestDescriptor {
            body: Some(
                base64::engine::general_purpose::STANDARD
                    .encode(r#"{"studentid":"S9"}"#)
                    .into(),
            ),
            is_base64_encoded: Some(Value::Bool(true)),
            ..Default::default()
        };
        assert_eq!(req.json_body().unwrap()["studentid"], "S9");
    }

    #[test]
    fn body_faults_are_internal() {
        let missing = RequestDescriptor::default();
        assert!(matches!(missing.json_body(), Err(ApiError::Internal(_))));

        let malformed = RequestDescriptor {
            body: Some("{not json".into()),
            ..Default::default()
        };
        assert!(matches!(malformed.json_body(), Err(ApiError::Internal(_))));

        let array = RequestDescriptor {
            body: Some("[1, 2]".into()),
            ..Default::default()
        };
        assert_eq!(
            array.json_body(),
            Err(ApiError::Internal("Request body must be a JSON object".into()))
        );
    }

    #[test]
    fn wrongly_typed_fields_decode_and_fail_only_when_read() {
        let req: RequestDescriptor = serde_json::from_value(json!({
            "httpMethod": "GET",
            "path": "/student",
            "body": { "x": 1 },
            "isBase64Encoded": "yes",
            "queryStringParameters": { "page": 1, "studentid": "S1" }
        }))
        .unwrap();

        assert_eq!(req.query_param("studentid").unwrap(), "S1");
        assert_eq!(
            req.query_param("page"),
            Err(ApiError::Internal("Query parameter page must be a string".into()))
        );
        assert_eq!(
            req.json_body(),
            Err(ApiError::Internal("Request body must be a string".into()))
        );
    }

    #[test]
    fn base64_flag_must_be_boolean_when_body_is_read() {
        let req = RequestDescriptor {
            body: Some(r#"{"studentid":"S1"}"#.into()),
            is_base64_encoded: Some("true".into()),
            ..Default::default()
        };
        assert_eq!(
            req.json_body(),
            Err(ApiError::Internal("isBase64Encoded must be a boolean".into()))
        );

        let null_flag = RequestDescriptor {
            is_base64_encoded: Some(Value::Null),
            ..req
        };
        assert_eq!(null_flag.json_body().unwrap()["studentid"], "S1");
    }

    #[test]
    fn non_mapping_query_parameters_are_internal() {
        let req = RequestDescriptor {
            query_string_parameters: Some("oops".into()),
            ..Default::default()
        };
        assert_eq!(
            req.query_param("studentid"),
            Err(ApiError::Internal("queryStringParameters must be a mapping".into()))
        );
    }

    #[test]
    fn response_is_serialized_for_api_gateway() {
        let resp = ResponseDescriptor::json(StatusCode::OK, &json!([]));
        let wire = serde_json::to_value(&resp).unwrap();

        assert_eq!(wire["statusCode"], 200);
        assert_eq!(wire["body"], "[]");
        assert_eq!(wire["headers"]["Content-Type"], "application/json");
    }
}
