//! PetFriends API client
//!
//! Thin wrapper over the PetFriends REST API: one method per endpoint, no
//! retry, no pagination, one HTTP round trip per call. Every operation returns
//! the raw status code paired with the decoded response body so tests can
//! assert on whatever the service actually sent back, including error pages.
//!
//! # Example
//!
//! ```no_run
//! use petfriends_qa::client::{PetFriendsClient, PetFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PetFriendsClient::new("https://petfriends.skillfactory.ru")?;
//!
//! let auth = client.get_api_key("user@example.com", "secret").await?;
//! assert_eq!(auth.status.as_u16(), 200);
//! let key = auth.body["key"].as_str().unwrap().to_string();
//!
//! let pets = client.get_list_of_pets(&key, PetFilter::All).await?;
//! println!("pets: {}", pets.body["pets"].as_array().unwrap().len());
//! # Ok(())
//! # }
//! ```

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use reqwest::StatusCode;

/// Client errors
///
/// Only transport-level failures are errors. HTTP error statuses (403, 400,
/// 500) are data, carried inside [`ApiResponse`].
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to read photo file {path}: {source}")]
    Photo {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Raw API response: status code plus decoded body
///
/// The body is parsed JSON when the service sends JSON; otherwise the raw
/// text is wrapped as a JSON string (the service answers auth failures with
/// an HTML page).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    async fn read(response: reqwest::Response) -> Result<Self, ClientError> {
        let status = response.status();
        let text = response.text().await?;
        Ok(Self {
            status,
            body: decode_body(&text),
        })
    }

    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Deserialize the body into a wire model
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }
}

/// Parse a response body as JSON, falling back to the raw text
fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// Successful `/api/key` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    pub key: String,
}

/// A pet record as the service returns it
///
/// `age` is a string on the wire. The service accepts and echoes arbitrary
/// text there, which is exactly what the validation probes exploit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    #[serde(default)]
    pub pet_photo: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload of the pet listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

/// Listing filter accepted by `/api/pets`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PetFilter {
    /// Every pet on the service (empty filter)
    #[default]
    All,
    /// Only pets owned by the authenticated account
    MyPets,
}

impl PetFilter {
    /// Wire value of the `filter` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
        }
    }
}

/// PetFriends API client
pub struct PetFriendsClient {
    base_url: String,
    http: reqwest::Client,
}

impl PetFriendsClient {
    /// Create a new client for the given deployment
    ///
    /// A trailing slash on the base URL is normalized away.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder().build()?;

        Ok(Self { base_url, http })
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Obtain an API key for an account
    ///
    /// GET `/api/key` with the credentials in the `email` and `password`
    /// headers. The service answers 200 with `{"key": ...}` for a known
    /// account and 403 with an HTML page otherwise.
    #[tracing::instrument(
        name = "petfriends.get_api_key",
        skip(self, password),
        fields(
            http.method = "GET",
            account.email = %email,
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    pub async fn get_api_key(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/key", self.base_url))
            .header("email", email)
            .header("password", password)
            .send()
            .await?;

        let api = ApiResponse::read(response).await?;
        tracing::Span::current().record("http.status_code", api.status.as_u16());
        tracing::debug!(status = %api.status, "GetApiKey completed");
        Ok(api)
    }

    /// List pets, optionally restricted to the account's own pets
    ///
    /// GET `/api/pets?filter=...` with the key in the `auth_key` header.
    #[tracing::instrument(
        name = "petfriends.get_list_of_pets",
        skip(self, auth_key),
        fields(
            http.method = "GET",
            filter = filter.as_str(),
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    pub async fn get_list_of_pets(
        &self,
        auth_key: &str,
        filter: PetFilter,
    ) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/pets", self.base_url))
            .header("auth_key", auth_key)
            .query(&[("filter", filter.as_str())])
            .send()
            .await?;

        let api = ApiResponse::read(response).await?;
        tracing::Span::current().record("http.status_code", api.status.as_u16());
        tracing::debug!(status = %api.status, "GetListOfPets completed");
        Ok(api)
    }

    /// Add a new pet with a photo
    ///
    /// POST `/api/pets` as a multipart form: `name`, `animal_type` and `age`
    /// text parts plus a `pet_photo` file part read from the local
    /// filesystem. The MIME type is guessed from the file extension.
    ///
    /// The client sends `age` verbatim; whether the service rejects values
    /// like `-100` is the service's concern being probed.
    #[tracing::instrument(
        name = "petfriends.add_new_pet",
        skip(self, auth_key),
        fields(
            http.method = "POST",
            pet.name = %name,
            pet.animal_type = %animal_type,
            photo = %photo_path.display(),
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    pub async fn add_new_pet(
        &self,
        auth_key: &str,
        name: &str,
        animal_type: &str,
        age: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse, ClientError> {
        let form = reqwest::multipart::Form::new()
            .text("name", name.to_string())
            .text("animal_type", animal_type.to_string())
            .text("age", age.to_string())
            .part("pet_photo", photo_part(photo_path).await?);

        let response = self
            .http
            .post(format!("{}/api/pets", self.base_url))
            .header("auth_key", auth_key)
            .multipart(form)
            .send()
            .await?;

        let api = ApiResponse::read(response).await?;
        tracing::Span::current().record("http.status_code", api.status.as_u16());
        tracing::debug!(status = %api.status, "AddNewPet completed");
        Ok(api)
    }

    /// Create a pet without a photo
    ///
    /// POST `/api/create_pet_simple` as a URL-encoded form. Fields are
    /// optional: a `None` is omitted from the form entirely, which is how the
    /// missing-field probes exercise the service's validation.
    #[tracing::instrument(
        name = "petfriends.create_pet_simple",
        skip(self, auth_key),
        fields(
            http.method = "POST",
            pet.name = name.unwrap_or("<omitted>"),
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    pub async fn create_pet_simple(
        &self,
        auth_key: &str,
        name: Option<&str>,
        animal_type: Option<&str>,
        age: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let mut form: Vec<(&str, &str)> = Vec::new();
        if let Some(name) = name {
            form.push(("name", name));
        }
        if let Some(animal_type) = animal_type {
            form.push(("animal_type", animal_type));
        }
        if let Some(age) = age {
            form.push(("age", age));
        }

        let response = self
            .http
            .post(format!("{}/api/create_pet_simple", self.base_url))
            .header("auth_key", auth_key)
            .form(&form)
            .send()
            .await?;

        let api = ApiResponse::read(response).await?;
        tracing::Span::current().record("http.status_code", api.status.as_u16());
        tracing::debug!(status = %api.status, "CreatePetSimple completed");
        Ok(api)
    }

    /// Update an existing pet's name, type and age
    ///
    /// PUT `/api/pets/{pet_id}` as a URL-encoded form.
    #[tracing::instrument(
        name = "petfriends.update_pet_info",
        skip(self, auth_key),
        fields(
            http.method = "PUT",
            pet.id = %pet_id,
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    pub async fn update_pet_info(
        &self,
        auth_key: &str,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .put(format!("{}/api/pets/{}", self.base_url, pet_id))
            .header("auth_key", auth_key)
            .form(&[("name", name), ("animal_type", animal_type), ("age", age)])
            .send()
            .await?;

        let api = ApiResponse::read(response).await?;
        tracing::Span::current().record("http.status_code", api.status.as_u16());
        tracing::debug!(status = %api.status, "UpdatePetInfo completed");
        Ok(api)
    }

    /// Delete a pet
    ///
    /// DELETE `/api/pets/{pet_id}`. Mutates remote state.
    #[tracing::instrument(
        name = "petfriends.delete_pet",
        skip(self, auth_key),
        fields(
            http.method = "DELETE",
            pet.id = %pet_id,
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    pub async fn delete_pet(&self, auth_key: &str, pet_id: &str) -> Result<ApiResponse, ClientError> {
        let response = self
            .http
            .delete(format!("{}/api/pets/{}", self.base_url, pet_id))
            .header("auth_key", auth_key)
            .send()
            .await?;

        let api = ApiResponse::read(response).await?;
        tracing::Span::current().record("http.status_code", api.status.as_u16());
        tracing::debug!(status = %api.status, "DeletePet completed");
        Ok(api)
    }

    /// Attach a photo to an existing pet
    ///
    /// POST `/api/pets/set_photo/{pet_id}` as a multipart form with a single
    /// `pet_photo` file part.
    #[tracing::instrument(
        name = "petfriends.add_photo_of_pet",
        skip(self, auth_key),
        fields(
            http.method = "POST",
            pet.id = %pet_id,
            photo = %photo_path.display(),
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    pub async fn add_photo_of_pet(
        &self,
        auth_key: &str,
        pet_id: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse, ClientError> {
        let form = reqwest::multipart::Form::new()
            .part("pet_photo", photo_part(photo_path).await?);

        let response = self
            .http
            .post(format!("{}/api/pets/set_photo/{}", self.base_url, pet_id))
            .header("auth_key", auth_key)
            .multipart(form)
            .send()
            .await?;

        let api = ApiResponse::read(response).await?;
        tracing::Span::current().record("http.status_code", api.status.as_u16());
        tracing::debug!(status = %api.status, "AddPhotoOfPet completed");
        Ok(api)
    }
}

/// Build the `pet_photo` multipart part from a local file
async fn photo_part(path: &Path) -> Result<reqwest::multipart::Part, ClientError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::Photo {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pet_photo".to_string());

    Ok(reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(guess_mime(path))?)
}

/// Guess the MIME type of a photo from its extension
fn guess_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
