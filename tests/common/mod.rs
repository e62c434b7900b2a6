//! Common test infrastructure
//!
//! Shared utilities for the mock-backed suite:
//! - wiremock stand-in for the PetFriends auth endpoint
//! - multipart form matcher for the photo upload endpoints
//! - pet JSON builders matching the service's wire shape
//! - throwaway image fixtures

// Each test binary compiles its own copy and uses a subset of the helpers.
#![allow(dead_code)]

use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use petfriends_qa::client::PetFriendsClient;

/// Credentials the mock service recognizes
pub const VALID_EMAIL: &str = "qa@example.com";
pub const VALID_PASSWORD: &str = "correct-horse-battery";

/// Credentials the mock service rejects
pub const INVALID_EMAIL: &str = "nobody@example.invalid";
pub const INVALID_PASSWORD: &str = "wrong-password";

/// API key the mock hands out for the valid account
pub const AUTH_KEY: &str = "ea738148a1f19838e1c5d1413877f3691a3731380e733e877b0ae729";

/// HTML page the real service serves on auth failures
pub const FORBIDDEN_PAGE: &str =
    "<html><head><title>403 Forbidden</title></head><body>Forbidden</body></html>";

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> PetFriendsClient {
    PetFriendsClient::new(server.uri()).expect("client construction")
}

/// Mount the `/api/key` endpoint: 200 + key for the exact valid credentials,
/// 403 + HTML page for anything else.
pub async fn mount_api_key(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/key"))
        .and(header("email", VALID_EMAIL))
        .and(header("password", VALID_PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": AUTH_KEY })))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/key"))
        .respond_with(ResponseTemplate::new(403).set_body_string(FORBIDDEN_PAGE))
        .with_priority(5)
        .mount(server)
        .await;
}

/// Authenticate against the mock and return the key
pub async fn authenticate(client: &PetFriendsClient) -> String {
    let auth = client
        .get_api_key(VALID_EMAIL, VALID_PASSWORD)
        .await
        .expect("auth request");
    assert_eq!(auth.status.as_u16(), 200, "mock auth must succeed");
    auth.body["key"].as_str().expect("key field").to_string()
}

/// Matcher for the photo upload endpoints: the request must be a multipart
/// form carrying a `pet_photo` file part with JPEG content, plus the given
/// text fields with their values.
pub struct MultipartPhotoForm {
    fields: Vec<(String, String)>,
}

/// Build a [`MultipartPhotoForm`] matcher
pub fn multipart_photo_form(fields: &[(&str, &str)]) -> MultipartPhotoForm {
    MultipartPhotoForm {
        fields: fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

impl Match for MultipartPhotoForm {
    fn matches(&self, request: &Request) -> bool {
        let is_multipart = request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));
        if !is_multipart {
            return false;
        }

        // File part is present and carries the JPEG magic bytes
        if !contains_subslice(&request.body, b"name=\"pet_photo\"")
            || !contains_subslice(&request.body, &[0xFF, 0xD8, 0xFF])
        {
            return false;
        }

        self.fields.iter().all(|(name, value)| {
            contains_subslice(&request.body, format!("name=\"{name}\"").as_bytes())
                && contains_subslice(&request.body, value.as_bytes())
        })
    }
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// A pet record as the service would return it
pub fn pet_json(id: &str, name: &str, animal_type: &str, age: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "animal_type": animal_type,
        "age": age,
        "pet_photo": "",
        "created_at": "1588572428.8"
    })
}

/// A pet listing payload
pub fn pet_list_json(pets: Vec<Value>) -> Value {
    json!({ "pets": pets })
}

/// Write a throwaway JPEG fixture (magic bytes only, the service never
/// validates image contents)
pub fn temp_jpeg() -> NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .prefix("pet_photo")
        .suffix(".jpeg")
        .tempfile()
        .expect("temp file");
    file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0xFF, 0xD9])
        .expect("write fixture");
    file
}
