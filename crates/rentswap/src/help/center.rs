use serde::Serialize;
use tracing::{info, warn};

use super::catalog::FaqCatalog;
use super::HelpError;
use crate::alerts::UserAlert;
use crate::config::SupportConfig;
use crate::links::{ContactChannel, DeepLink, LaunchError, LinkError, LinkLauncher};

const WHATSAPP_GREETING: &str = "Hi, I need help with RentSwap";
const EMAIL_SUBJECT: &str = "RentSwap support request";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportContacts {
    pub whatsapp: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

impl From<&SupportConfig> for SupportContacts {
    fn from(config: &SupportConfig) -> Self {
        Self {
            whatsapp: config.whatsapp.clone(),
            email: config.email.clone(),
            phone: config.phone.clone(),
            website: config.website.clone(),
        }
    }
}

impl Default for SupportContacts {
    fn default() -> Self {
        Self::from(&SupportConfig::default())
    }
}

pub struct HelpCenter {
    catalog: FaqCatalog,
    contacts: SupportContacts,
}

impl HelpCenter {
    pub fn new(catalog: FaqCatalog, contacts: SupportContacts) -> Self {
        Self { catalog, contacts }
    }

    /// Builds the help center from configuration, reading the FAQ file when one is set.
    pub fn from_config(config: &SupportConfig) -> Result<Self, HelpError> {
        let catalog = match &config.faq_csv {
            Some(path) => FaqCatalog::from_path(path)?,
            None => FaqCatalog::standard(),
        };
        Ok(Self::new(catalog, SupportContacts::from(config)))
    }

    pub fn catalog(&self) -> &FaqCatalog {
        &self.catalog
    }

    pub fn contacts(&self) -> &SupportContacts {
        &self.contacts
    }

    pub fn contact_link(&self, channel: ContactChannel) -> Result<DeepLink, LinkError> {
        match channel {
            ContactChannel::Whatsapp => {
                DeepLink::whatsapp(&self.contacts.whatsapp, Some(WHATSAPP_GREETING))
            }
            ContactChannel::Email => DeepLink::email(&self.contacts.email, Some(EMAIL_SUBJECT), None),
            ContactChannel::Phone => DeepLink::telephone(&self.contacts.phone),
            ContactChannel::Website => DeepLink::web(&self.contacts.website),
        }
    }

    /// Opens the channel through `launcher`. Failures come back as an alert for the user.
    ///
    /// A messaging link with no installed handler is retried through its web fallback.
    pub fn contact(&self, channel: ContactChannel, launcher: &dyn LinkLauncher) -> Option<UserAlert> {
        let link = match self.contact_link(channel) {
            Ok(link) => link,
            Err(err) => {
                warn!(channel = channel.label(), error = %err, "support contact is misconfigured");
                return Some(UserAlert::from(&err));
            }
        };

        match launch(&link, launcher) {
            Ok(()) => {
                info!(channel = channel.label(), uri = link.uri(), "support contact opened");
                None
            }
            Err(err) => {
                warn!(channel = channel.label(), error = %err, "support contact could not be opened");
                Some(UserAlert::from(&err))
            }
        }
    }
}

fn launch(link: &DeepLink, launcher: &dyn LinkLauncher) -> Result<(), LaunchError> {
    match (launcher.open(link), link) {
        (Err(LaunchError::NoHandler(_)), DeepLink::Messaging { web_fallback, .. }) => {
            launcher.open(&DeepLink::Web {
                uri: web_fallback.clone(),
            })
        }
        (outcome, _) => outcome,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records opened links and refuses every URI that starts with one of `refuse`.
    #[derive(Default)]
    struct RecordingLauncher {
        opened: Mutex<Vec<String>>,
        refuse: Vec<&'static str>,
        broken: bool,
    }

    impl LinkLauncher for RecordingLauncher {
        fn open(&self, link: &DeepLink) -> Result<(), LaunchError> {
            if self.broken {
                return Err(LaunchError::Failed("launcher crashed".to_string()));
            }
            if self.refuse.iter().any(|prefix| link.uri().starts_with(prefix)) {
                return Err(LaunchError::NoHandler(link.uri().to_string()));
            }
            self.opened.lock().unwrap().push(link.uri().to_string());
            Ok(())
        }
    }

    fn center() -> HelpCenter {
        HelpCenter::new(FaqCatalog::standard(), SupportContacts::default())
    }

    #[test]
    fn builds_a_link_for_every_channel() {
        let center = center();
        for channel in ContactChannel::ordered() {
            assert!(center.contact_link(channel).is_ok(), "{channel:?}");
        }
        assert_eq!(
            center.contact_link(ContactChannel::Phone).unwrap().uri(),
            "tel:+15550100300"
        );
    }

    #[test]
    fn opening_a_channel_returns_no_alert() {
        let launcher = RecordingLauncher::default();
        assert_eq!(center().contact(ContactChannel::Email, &launcher), None);
        let opened = launcher.opened.lock().unwrap();
        assert!(opened[0].starts_with("mailto:support@rentswap.app"));
    }

    #[test]
    fn missing_whatsapp_app_falls_back_to_web() {
        let launcher = RecordingLauncher {
            refuse: vec!["whatsapp://"],
            ..RecordingLauncher::default()
        };
        assert_eq!(center().contact(ContactChannel::Whatsapp, &launcher), None);
        let opened = launcher.opened.lock().unwrap();
        assert!(opened[0].starts_with("https://wa.me/15550100200"));
    }

    #[test]
    fn launcher_failure_becomes_alert() {
        let launcher = RecordingLauncher {
            broken: true,
            ..RecordingLauncher::default()
        };
        let alert = center()
            .contact(ContactChannel::Website, &launcher)
            .expect("alert raised");
        assert_eq!(alert.title, "Couldn't open link");
    }

    #[test]
    fn misconfigured_contact_becomes_alert() {
        let contacts = SupportContacts {
            phone: "   ".to_string(),
            ..SupportContacts::default()
        };
        let center = HelpCenter::new(FaqCatalog::standard(), contacts);
        let alert = center
            .contact(ContactChannel::Phone, &RecordingLauncher::default())
            .expect("alert raised");
        assert_eq!(alert.title, "Contact unavailable");
    }
}
