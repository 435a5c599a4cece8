use serde::Deserialize;

/// JSON body of `POST /subscribe`
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub list: String,
}
