use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::HelpError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: String,
    pub category: String,
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    fn matches(&self, needle: &str) -> bool {
        self.question.to_lowercase().contains(needle) || self.answer.to_lowercase().contains(needle)
    }
}

/// Ordered list of frequently asked questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqCatalog {
    entries: Vec<FaqEntry>,
}

impl FaqCatalog {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    pub fn standard() -> Self {
        let entries = STANDARD_FAQS
            .iter()
            .map(|(id, category, question, answer)| FaqEntry {
                id: (*id).to_string(),
                category: (*category).to_string(),
                question: (*question).to_string(),
                answer: (*answer).to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Load a catalog from a CSV file with an `id,category,question,answer` header.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, HelpError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HelpError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();
        for record in csv_reader.deserialize::<FaqEntry>() {
            let entry = record?;
            if entry.question.is_empty() {
                continue;
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive match on question or answer. A blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<&FaqEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| needle.is_empty() || entry.matches(&needle))
            .collect()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }
        categories
    }

    pub fn by_category(&self, category: &str) -> Vec<&FaqEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.category.eq_ignore_ascii_case(category.trim()))
            .collect()
    }
}

const STANDARD_FAQS: &[(&str, &str, &str, &str)] = &[
    (
        "getting-started-1",
        "Getting Started",
        "How do I post a listing?",
        "Tap the plus button, choose Rent or Swap, pick House or Car, then fill in the details, add at least one photo and confirm your location.",
    ),
    (
        "getting-started-2",
        "Getting Started",
        "What is the difference between renting and swapping?",
        "Renting charges a price per period. Swapping trades use of your property for someone else's, optionally with an estimated value.",
    ),
    (
        "renting-1",
        "Renting",
        "Which rental periods can I offer?",
        "Listings can be rented daily, weekly, or monthly, with a minimum number of periods you choose.",
    ),
    (
        "renting-2",
        "Renting",
        "Can I ask for a security deposit?",
        "Yes. Add a security deposit amount in the rental terms and it is shown to renters before they contact you.",
    ),
    (
        "swapping-1",
        "Swapping",
        "How do I describe what I want in return?",
        "Use the swap preferences field to say what you are looking for, for example a villa for the summer or an SUV for a weekend.",
    ),
    (
        "swapping-2",
        "Swapping",
        "Do both sides need to match in value?",
        "No. The swap value is only a guide so both parties can agree on a fair exchange.",
    ),
    (
        "payments-1",
        "Payments & Deposits",
        "When is the deposit returned?",
        "Deposits are returned by the owner once the item has been handed back in the agreed condition.",
    ),
    (
        "payments-2",
        "Payments & Deposits",
        "Which currencies are supported?",
        "Prices are entered in your local currency and shown to other users as listed.",
    ),
    (
        "safety-1",
        "Safety",
        "How do I stay safe when meeting someone?",
        "Meet in public places, check documents before handing over keys, and never pay outside the agreed method.",
    ),
    (
        "safety-2",
        "Safety",
        "How do I report a suspicious listing?",
        "Contact support over WhatsApp or email with the listing title and we will review it.",
    ),
    (
        "account-1",
        "Account",
        "How do I change my default address?",
        "Open your address book and mark another address as default. Only one address is the default at a time.",
    ),
    (
        "account-2",
        "Account",
        "Why does the app ask for my location?",
        "Your location pre-fills listing addresses and shows distances. You can always enter an address manually instead.",
    ),
];
