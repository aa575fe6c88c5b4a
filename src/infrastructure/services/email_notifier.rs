// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::settings::EmailSettings;
use crate::domain::services::notification_service::NotificationService;
use crate::utils::errors::NotifyError;

/// 邮件主题
pub const EMAIL_SUBJECT: &str = "Scraping Notification";

/// SMTP连接的加密方式，由端口决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// 465端口，连接即TLS
    ImplicitTls,
    /// 587端口，明文连接后升级
    StartTls,
    /// 其他端口，不加密
    Plain,
}

impl SmtpSecurity {
    pub fn for_port(port: u16) -> Self {
        match port {
            465 => SmtpSecurity::ImplicitTls,
            587 => SmtpSecurity::StartTls,
            _ => SmtpSecurity::Plain,
        }
    }
}

/// 邮件通知
pub struct EmailNotifier {
    settings: EmailSettings,
}

impl EmailNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    /// 构建邮件
    ///
    /// # 参数
    ///
    /// * `body` - 邮件正文
    ///
    /// # 返回值
    ///
    /// * `Ok(Message)` - 构建好的邮件
    /// * `Err(NotifyError)` - 发件人或收件人地址无效
    pub fn build_message(&self, body: &str) -> Result<Message, NotifyError> {
        let from: Mailbox = self.settings.sender.parse()?;
        let to: Mailbox = self.settings.recipient.parse()?;

        Ok(Message::builder()
            .from(from)
            .to(to)
            .subject(EMAIL_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
        let server = self.settings.smtp_server.as_str();
        let port = self.settings.smtp_port;

        let builder = match SmtpSecurity::for_port(port) {
            SmtpSecurity::ImplicitTls => AsyncSmtpTransport::<Tokio1Executor>::relay(server)?,
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)?
            }
            SmtpSecurity::Plain => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(server),
        };

        let credentials = Credentials::new(
            self.settings.username.clone(),
            self.settings.password.clone(),
        );

        Ok(builder.port(port).credentials(credentials).build())
    }
}

#[async_trait]
impl NotificationService for EmailNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let email = self.build_message(message)?;
        self.transport()?.send(email).await?;

        info!("Email sent to {} successfully.", self.settings.recipient);
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "email"
    }
}
