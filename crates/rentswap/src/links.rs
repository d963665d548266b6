//! Outbound deep links to messaging, e-mail, telephone, and web destinations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Destination handed to the platform link opener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeepLink {
    Messaging { uri: String, web_fallback: String },
    Email { uri: String },
    Telephone { uri: String },
    Web { uri: String },
}

impl DeepLink {
    /// WhatsApp chat with an optional prefilled message.
    pub fn whatsapp(phone: &str, text: Option<&str>) -> Result<Self, LinkError> {
        let digits = phone_digits(phone);
        if digits.is_empty() {
            return Err(LinkError::MissingPhone);
        }

        let (uri, web_fallback) = match text.filter(|text| !text.trim().is_empty()) {
            Some(text) => {
                let encoded = urlencoding::encode(text);
                (
                    format!("whatsapp://send?phone={digits}&text={encoded}"),
                    format!("https://wa.me/{digits}?text={encoded}"),
                )
            }
            None => (
                format!("whatsapp://send?phone={digits}"),
                format!("https://wa.me/{digits}"),
            ),
        };

        Ok(Self::Messaging { uri, web_fallback })
    }

    pub fn email(address: &str, subject: Option<&str>, body: Option<&str>) -> Result<Self, LinkError> {
        let address = address.trim();
        if address.is_empty() || !address.contains('@') {
            return Err(LinkError::InvalidEmail(address.to_string()));
        }

        let mut query = Vec::new();
        if let Some(subject) = subject.filter(|value| !value.is_empty()) {
            query.push(format!("subject={}", urlencoding::encode(subject)));
        }
        if let Some(body) = body.filter(|value| !value.is_empty()) {
            query.push(format!("body={}", urlencoding::encode(body)));
        }

        let uri = if query.is_empty() {
            format!("mailto:{address}")
        } else {
            format!("mailto:{address}?{}", query.join("&"))
        };
        Ok(Self::Email { uri })
    }

    pub fn telephone(phone: &str) -> Result<Self, LinkError> {
        let digits = phone_digits(phone);
        if digits.is_empty() {
            return Err(LinkError::MissingPhone);
        }
        let prefix = if phone.trim_start().starts_with('+') {
            "+"
        } else {
            ""
        };
        Ok(Self::Telephone {
            uri: format!("tel:{prefix}{digits}"),
        })
    }

    pub fn web(url: &str) -> Result<Self, LinkError> {
        let url = url.trim();
        let lower = url.to_ascii_lowercase();
        let has_host = lower
            .strip_prefix("https://")
            .or_else(|| lower.strip_prefix("http://"))
            .map(|rest| !rest.is_empty())
            .unwrap_or(false);
        if !has_host {
            return Err(LinkError::UnsupportedUrl(url.to_string()));
        }
        Ok(Self::Web {
            uri: url.to_string(),
        })
    }

    /// Primary URI for the platform opener.
    pub fn uri(&self) -> &str {
        match self {
            DeepLink::Messaging { uri, .. }
            | DeepLink::Email { uri }
            | DeepLink::Telephone { uri }
            | DeepLink::Web { uri } => uri,
        }
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("a phone number is required")]
    MissingPhone,
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
    #[error("'{0}' is not an http(s) URL")]
    UnsupportedUrl(String),
}

/// Fire-and-forget opener for deep links (app switcher, browser, dialer).
pub trait LinkLauncher: Send + Sync {
    fn open(&self, link: &DeepLink) -> Result<(), LaunchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    #[error("no application can open '{0}'")]
    NoHandler(String),
    #[error("launcher failed: {0}")]
    Failed(String),
}

/// Channels offered by the help center contact sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    Whatsapp,
    Email,
    Phone,
    Website,
}

impl ContactChannel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Whatsapp, Self::Email, Self::Phone, Self::Website]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Whatsapp => "WhatsApp",
            Self::Email => "Email",
            Self::Phone => "Call us",
            Self::Website => "Website",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "whatsapp" | "chat" => Some(Self::Whatsapp),
            "email" | "mail" => Some(Self::Email),
            "phone" | "call" | "tel" => Some(Self::Phone),
            "website" | "web" => Some(Self::Website),
            _ => None,
        }
    }
}
