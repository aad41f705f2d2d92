use std::env::var;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use lettre::{
    message::{header::ContentType, Mailbox, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::notify::Submission;

const DEFAULT_PORT: u16 = 587;
const DEFAULT_SENDER: &str = "noreply@example.com";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Default, Clone)]
pub struct MailConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub recipient: Option<String>,
}

impl MailConfig {
    pub fn from_env() -> Self {
        let port = var("SMTP_PORT").ok().and_then(|port| match port.parse() {
            Ok(port) => Some(port),
            Err(err) => {
                tracing::warn!("Ignoring invalid SMTP_PORT {}: {}", port, err);
                None
            }
        });

        Self {
            host: non_empty_var("SMTP_HOST"),
            port,
            username: non_empty_var("SMTP_USER"),
            password: non_empty_var("SMTP_PASS"),
            recipient: non_empty_var("EMAIL_TO"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    var(key).ok().filter(|val| !val.is_empty())
}

/// Sends a plain-text mail per submission through an SMTP relay using STARTTLS.
#[derive(Debug)]
pub struct Mailer {
    host: String,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    recipient: Option<String>,
}

impl Mailer {
    /// Returns `None` if no SMTP host is configured.
    pub fn new(config: MailConfig) -> Option<Self> {
        let host = config.host?;

        Some(Self {
            host,
            port: config.port.unwrap_or(DEFAULT_PORT),
            username: config.username,
            password: config.password,
            recipient: config.recipient,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn notify(&self, submission: &Submission) {
        if let Err(err) = self.send(submission).await {
            tracing::warn!("Failed to send contact notification mail: {:#}", err);
        }
    }

    async fn send(&self, submission: &Submission) -> Result<()> {
        let mail = self.build_message(submission)?;

        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .port(self.port)
            .timeout(Some(CONNECT_TIMEOUT));

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            transport =
                transport.credentials(Credentials::new(username.clone(), password.clone()));
        }

        transport
            .build()
            .send(mail)
            .await
            .with_context(|| {
                format!("Failed to deliver mail via {}:{}", self.host, self.port)
            })?;

        tracing::debug!("Sent notification mail for contact from {}", submission.name);

        Ok(())
    }

    fn build_message(&self, submission: &Submission) -> Result<Message> {
        let from = self
            .username
            .as_deref()
            .unwrap_or(DEFAULT_SENDER)
            .parse::<Mailbox>()
            .context("Invalid sender address")?;

        let to = self
            .recipient
            .as_deref()
            .or(self.username.as_deref())
            .ok_or_else(|| anyhow!("Neither EMAIL_TO nor SMTP_USER is set"))?
            .parse::<Mailbox>()
            .context("Invalid recipient address")?;

        let mail = Message::builder()
            .from(from)
            .to(to)
            .subject(format!("New contact from {}", submission.name))
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(body(submission)),
            )?;

        Ok(mail)
    }
}

fn body(submission: &Submission) -> String {
    format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        submission.name, submission.email, submission.message
    )
}
