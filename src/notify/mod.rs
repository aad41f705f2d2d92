//! Best-effort forwarding of contact submissions.
//!
//! Each configured notifier runs as a detached task after the submission has been stored.
//! Failures are logged and then dropped so they can never reach the HTTP response.

pub mod mail;
#[cfg(feature = "sheets")]
pub mod sheet;

use std::future::Future;

use anyhow::Result;
use tokio::{
    spawn,
    time::{timeout, Duration},
};

use mail::{MailConfig, Mailer};
#[cfg(feature = "sheets")]
use sheet::{SheetAppender, SheetConfig};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Default)]
pub struct Notifiers {
    mailer: Option<Mailer>,
    #[cfg(feature = "sheets")]
    sheet: Option<SheetAppender>,
}

impl Notifiers {
    pub fn from_env() -> Result<Self> {
        let mailer = Mailer::new(MailConfig::from_env());

        match &mailer {
            Some(mailer) => {
                tracing::info!("Forwarding contacts via mail server {}", mailer.host())
            }
            None => tracing::info!("SMTP_HOST not set, mail notifications are disabled"),
        }

        #[cfg(feature = "sheets")]
        let sheet = {
            let sheet = SheetAppender::new(SheetConfig::from_env())?;

            match &sheet {
                Some(sheet) => {
                    tracing::info!("Appending contacts to spreadsheet {}", sheet.sheet_id())
                }
                None => tracing::info!("Spreadsheet notifications are disabled"),
            }

            sheet
        };

        #[cfg(not(feature = "sheets"))]
        tracing::info!("Built without spreadsheet support, notifications are disabled");

        Ok(Self {
            mailer,
            #[cfg(feature = "sheets")]
            sheet,
        })
    }

    pub fn with_mailer(mut self, mailer: Mailer) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Starts one detached task per configured notifier and returns without waiting for them.
    pub fn dispatch(&'static self, submission: Submission) {
        #[cfg(feature = "sheets")]
        if let Some(sheet) = &self.sheet {
            let submission = submission.clone();

            spawn(bounded("spreadsheet", async move {
                sheet.notify(&submission).await
            }));
        }

        if let Some(mailer) = &self.mailer {
            spawn(bounded("mail", async move { mailer.notify(&submission).await }));
        }
    }
}

async fn bounded<F>(notifier: &'static str, notify: F)
where
    F: Future<Output = ()>,
{
    if timeout(NOTIFY_TIMEOUT, notify).await.is_err() {
        tracing::warn!(
            "Discarding {} notification after {:?}",
            notifier,
            NOTIFY_TIMEOUT
        );
    }
}
