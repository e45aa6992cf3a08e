//! Notification email: composition and SMTP delivery

use std::future::Future;

use anyhow::{Context, Result};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// A rendered notification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Build the email for an answer
pub fn compose(player_name: &str, response: &str, timestamp: &str) -> Email {
    let shout = response.to_uppercase();
    let closing = if response == "Yes" {
        "🎉 Time to celebrate!"
    } else {
        "😢 Check in on her..."
    };

    let subject = format!("❤️ SHE SAID {shout}! - Dino Valentine");
    let text = format!(
        "Big news!\n\n{player_name} clicked \"{response}\" on the Dino Valentine game.\n\nTime: {timestamp}\n\nCongrats/Condolences!"
    );
    let html = format!(
        "<h1>SHE SAID {}!</h1>\n<p>{} just finished the game and clicked the button.</p>\n<p><strong>Time:</strong> {}</p>\n<p>{}</p>",
        escape_html(&shout),
        escape_html(player_name),
        escape_html(timestamp),
        closing
    );

    Email {
        subject,
        text,
        html,
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Delivers notification emails
pub trait Mailer: Send + Sync + 'static {
    fn send(&self, email: Email) -> impl Future<Output = Result<()>> + Send;
}

/// SMTP relay settings
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub user: String,
    pub pass: String,
    /// Recipient of the notifications
    pub to: String,
}

/// Sends through an authenticated SMTP relay (STARTTLS/TLS on the default port)
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let from: Mailbox = settings
            .user
            .parse()
            .with_context(|| format!("invalid sender address {:?}", settings.user))?;
        let to: Mailbox = settings
            .to
            .parse()
            .with_context(|| format!("invalid recipient address {:?}", settings.to))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .with_context(|| format!("cannot use SMTP relay {}", settings.host))?
            .credentials(Credentials::new(settings.user.clone(), settings.pass.clone()))
            .build();
        Ok(Self { transport, from, to })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, email: Email) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(email.text, email.html))
            .context("building notification email")?;
        self.transport
            .send(message)
            .await
            .context("sending notification email")?;
        Ok(())
    }
}
