use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::Mailbox,
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info, warn};

/// Outbound confirmation mail. Sending is strictly fire-and-forget: the
/// HTTP response is never gated on it, and a failed send is logged and
/// dropped. With no SMTP configuration the transport stays disabled and
/// every send is a debug-logged no-op.
pub struct Mailer {
    configured: Option<(AsyncSmtpTransport<Tokio1Executor>, Mailbox)>,
}

impl Mailer {
    /// Reads MOOLIGAI_SMTP_HOST / MOOLIGAI_SMTP_USER / MOOLIGAI_SMTP_PASS
    /// and MOOLIGAI_MAIL_FROM (falls back to the SMTP user).
    pub fn from_env() -> Self {
        let host = std::env::var("MOOLIGAI_SMTP_HOST").ok();
        let user = std::env::var("MOOLIGAI_SMTP_USER").ok();
        let pass = std::env::var("MOOLIGAI_SMTP_PASS").ok();
        let from = std::env::var("MOOLIGAI_MAIL_FROM").ok().or_else(|| user.clone());

        let (Some(host), Some(user), Some(pass), Some(from)) = (host, user, pass, from) else {
            debug!("SMTP environment not set, outbound email disabled");
            return Self::disabled();
        };

        let from: Mailbox = match from.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                warn!("Invalid MOOLIGAI_MAIL_FROM '{}': {}, outbound email disabled", from, e);
                return Self::disabled();
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::relay(&host) {
            Ok(builder) => builder.credentials(Credentials::new(user, pass)).build(),
            Err(e) => {
                warn!("Invalid SMTP relay '{}': {}, outbound email disabled", host, e);
                return Self::disabled();
            }
        };

        info!("Mail transport configured via {}", host);
        Self {
            configured: Some((transport, from)),
        }
    }

    pub fn disabled() -> Self {
        Self { configured: None }
    }

    pub async fn send(&self, to: &str, subject: &str, body: String) {
        let Some((transport, from)) = &self.configured else {
            debug!("Email disabled, skipping confirmation to {}", to);
            return;
        };

        let mailbox: Mailbox = match to.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                warn!("Unroutable recipient address '{}': {}", to, e);
                return;
            }
        };

        let email = match Message::builder()
            .from(from.clone())
            .to(mailbox)
            .subject(subject)
            .body(body)
        {
            Ok(email) => email,
            Err(e) => {
                warn!("Could not build confirmation email for {}: {}", to, e);
                return;
            }
        };

        match transport.send(email).await {
            Ok(_) => info!("Confirmation email sent to {}", to),
            Err(e) => warn!("Email send failed for {}: {}", to, e),
        }
    }
}
