use anyhow::anyhow;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

use tuition_config::EmailConfig;
use tuition_core::AppError;

#[derive(Debug, Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/auth/verify-email?token={}",
            self.config.frontend_url.trim_end_matches('/'),
            token
        )
    }

    /// Sends the link that confirms a freshly registered email address.
    ///
    /// With SMTP disabled the link is written to the log instead, which is
    /// how local setups complete sign-up.
    #[instrument(skip(self, token))]
    pub async fn send_verification_email(
        &self,
        to_email: &str,
        to_name: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let link = self.verification_link(token);

        if !self.config.enabled {
            info!(email = %to_email, link = %link, "SMTP disabled; verification link not mailed");
            return Ok(());
        }

        let html_body = self.verification_template(to_name, &link);
        let text_body = format!(
            "Hi {},\n\n\
             Welcome to Tuition Manager.\n\n\
             Confirm your email address by opening the link below:\n\
             {}\n\n\
             Until you confirm, you will not be able to sign in.\n\n\
             Tuition Manager",
            to_name, link
        );

        self.send_email(to_email, "Confirm your email", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(anyhow!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal(anyhow!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| AppError::internal(anyhow!("Failed to create SMTP relay: {}", e)))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal(anyhow!("Failed to send email: {}", e)))?;

        Ok(())
    }

    fn verification_template(&self, name: &str, link: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Confirm your email</title>
</head>
<body style="margin: 0; padding: 24px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" align="center" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 8px;">
        <tr>
            <td style="background-color: #2563EB; padding: 24px; text-align: center;">
                <h1 style="margin: 0; color: #ffffff; font-size: 24px;">Tuition Manager</h1>
            </td>
        </tr>
        <tr>
            <td style="padding: 32px; color: #444444; font-size: 15px; line-height: 1.5;">
                <p>Hi <strong>{name}</strong>,</p>
                <p>Confirm your email address to finish setting up your account.</p>
                <p style="text-align: center; margin: 28px 0;">
                    <a href="{link}" style="padding: 12px 32px; background-color: #2563EB; color: #ffffff; text-decoration: none; border-radius: 6px;">Confirm email</a>
                </p>
                <p style="font-size: 13px; word-break: break-all;">{link}</p>
            </td>
        </tr>
    </table>
</body>
</html>"#
        )
    }
}
