use serde::Deserialize;

/// Form body of `POST /admin/enqueue-mail`
#[derive(Debug, Deserialize)]
pub struct EnqueueMailRequest {
    #[serde(default)]
    pub list_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}
