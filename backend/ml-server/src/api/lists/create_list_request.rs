use serde::Deserialize;

/// Form body of `POST /admin/create-list`
#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
