//! DTOs for users_sea adapter.

/// Profile fields supplied by the identity provider.
#[derive(Debug, Clone)]
pub struct UserUpsert {
    pub email: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl UserUpsert {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}
