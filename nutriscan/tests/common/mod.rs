#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nutriscan::config::{
    Config, LogFormat, LoggingConfig, NutritionConfig, RecognitionConfig, ServerConfig,
};

pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
    b'R',
];

pub const BOUNDARY: &str = "nutriscan-integration-boundary";

/// Config pointing both collaborators at mock servers.
pub fn config_for(recognition_url: &str, usda_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_size: 1024 * 1024,
        },
        recognition: RecognitionConfig {
            base_url: Some(recognition_url.to_string()),
            timeout_secs: 5,
            ..RecognitionConfig::default()
        },
        nutrition: NutritionConfig {
            api_key: Some("test-key".to_string()),
            base_url: usda_url.to_string(),
            timeout_secs: 2,
            ..NutritionConfig::default()
        },
        logging: LoggingConfig {
            format: LogFormat::Text,
        },
    }
}

/// Serves a one-hit search for `query` and the matching detail record.
pub async fn mount_usda_food(
    server: &MockServer,
    query: &str,
    fdc_id: u64,
    description: &str,
    nutrients: &[(u32, f64)],
) {
    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .and(query_param("query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalHits": 1,
            "foods": [{"fdcId": fdc_id, "description": description}]
        })))
        .mount(server)
        .await;

    let food_nutrients: Vec<Value> = nutrients
        .iter()
        .map(|(id, amount)| json!({"nutrient": {"id": id}, "amount": amount}))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/food/{fdc_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fdcId": fdc_id,
            "description": description,
            "foodNutrients": food_nutrients
        })))
        .mount(server)
        .await;
}

/// Any search not matched by a more specific mock returns no hits.
pub async fn mount_usda_empty_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalHits": 0, "foods": []})))
        .with_priority(10)
        .mount(server)
        .await;
}

pub async fn mount_recognition(server: &MockServer, result: &str) {
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": result })))
        .mount(server)
        .await;
}

pub fn multipart_body(file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}
