/// A single binary attachment carried by a message.
///
/// `encoded_payload` holds the base64 form and is only present on the
/// outbound-to-webhook representation; stored and UI-facing copies drop
/// it so conversation history does not grow with file contents.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub mime_type: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_payload: Option<String>,
}

impl Attachment {
    /// The stored/display representation, with the payload stripped.
    pub fn without_payload(&self) -> Attachment {
        Attachment {
            encoded_payload: None,
            ..self.clone()
        }
    }
}
