use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Json},
    Form,
};
use serde::{Deserialize, Serialize};
use tokio::task::spawn_blocking;

use crate::{
    notify::{Notifiers, Submission},
    server::ServerError,
    store::ContactStore,
};

const THANK_YOU: &str = "Thanks for reaching out! I'll get back to you soon.";

pub async fn contact(
    State(store): State<&'static ContactStore>,
    State(notifiers): State<&'static Notifiers>,
    ContactForm(submission): ContactForm,
) -> Result<Json<Receipt>, ServerError> {
    tracing::info!(
        "New contact message from {} <{}>",
        submission.name,
        submission.email
    );
    tracing::debug!("Message: {}", submission.message);

    let (id, submission) = spawn_blocking(move || {
        store
            .save(&submission.name, &submission.email, &submission.message)
            .map(|id| (id, submission))
    })
    .await??;

    notifiers.dispatch(submission);

    Ok(Json(Receipt {
        success: true,
        id,
        message: THANK_YOU,
    }))
}

#[derive(Serialize)]
pub struct Receipt {
    success: bool,
    id: i64,
    message: &'static str,
}

/// Contact form posted either URL-encoded or as `multipart/form-data`.
pub struct ContactForm(pub Submission);

#[async_trait]
impl<S> FromRequest<S> for ContactForm
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|header| header.to_str().ok())
            .map_or(false, |content_type| {
                content_type.starts_with("multipart/form-data")
            });

        let fields = if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| ServerError::Rejection(rejection.into_response()))?;

            read_multipart(multipart).await?
        } else {
            let Form(fields) = Form::<Fields>::from_request(req, state)
                .await
                .map_err(|rejection| ServerError::Rejection(rejection.into_response()))?;

            fields
        };

        fields.validate().map(Self)
    }
}

#[derive(Default, Deserialize)]
struct Fields {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

impl Fields {
    fn validate(self) -> Result<Submission, ServerError> {
        Ok(Submission {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            message: required("message", self.message)?,
        })
    }
}

fn required(field: &'static str, val: Option<String>) -> Result<String, ServerError> {
    val.filter(|val| !val.is_empty())
        .ok_or(ServerError::MissingField(field))
}

async fn read_multipart(mut multipart: Multipart) -> Result<Fields, ServerError> {
    let mut fields = Fields::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let slot = match field.name() {
            Some("name") => &mut fields.name,
            Some("email") => &mut fields.email,
            Some("message") => &mut fields.message,
            _ => continue,
        };

        *slot = Some(field.text().await.map_err(malformed)?);
    }

    Ok(fields)
}

fn malformed(err: MultipartError) -> ServerError {
    tracing::debug!("Rejecting malformed multipart body: {}", err);

    ServerError::BadRequest("Malformed multipart body")
}
