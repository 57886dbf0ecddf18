use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{try_iter, Array};
use web_sys::{Document, Event, FormData, HtmlFormElement};

use crate::dom;
use crate::error::{LandingError, Result};
use crate::notification::Notifier;

pub const CONTACT_FORM_ID: &str = "contactForm";

pub const SUCCESS_MESSAGE: &str = "Thank you for your interest! We will contact you soon to discuss how NEXUS AI can transform your trading journey.";
pub const ERROR_MESSAGE: &str = "Please fill in all required fields correctly.";

/// Anything but `@` or whitespace, where whitespace is JavaScript's `\s`
/// set rather than Rust's.
const EMAIL_PART: &str = r"[^@\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{part}+@{part}+\\.{part}+$", part = EMAIL_PART))
        .expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{0}` is required")]
    MissingField(&'static str),
    #[error("email address is malformed")]
    InvalidEmail,
}

/// Everything the contact form posted. Unknown fields are kept for the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub interest: String,
    pub message: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ContactSubmission {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                "name" => submission.name = value,
                "email" => submission.email = value,
                "interest" => submission.interest = value,
                "message" => submission.message = value,
                _ => {
                    submission.extra.insert(key, value);
                }
            }
        }
        submission
    }

    /// Checks the required fields in form order, then the email shape.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("interest", &self.interest),
            ("message", &self.message),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

fn read_form(form: &HtmlFormElement) -> Result<ContactSubmission> {
    let data = FormData::new_with_form(form)?;
    let entries = try_iter(&data)?.ok_or_else(|| LandingError::Js("FormData is not iterable".to_string()))?;

    let mut pairs = Vec::new();
    for entry in entries {
        let entry: Array = entry?.unchecked_into();
        // File inputs have no string value; they are not part of the payload.
        if let (Some(key), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
            pairs.push((key, value));
        }
    }
    Ok(ContactSubmission::from_pairs(pairs))
}

fn log_submission(submission: &ContactSubmission) {
    match serde_wasm_bindgen::to_value(submission) {
        Ok(payload) => gloo_console::log!("Form submitted:", payload),
        Err(_) => log::info!("Form submitted: {:?}", submission),
    }
}

/// Intercepts `#contactForm` submissions: validates them client-side and
/// reports the outcome as a toast. Nothing is sent over the network.
pub struct ContactForm;

impl ContactForm {
    pub fn attach(document: &Document, notifier: Notifier) -> Result<()> {
        let form = document
            .get_element_by_id(CONTACT_FORM_ID)
            .ok_or(LandingError::MissingElement("#contactForm"))?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| LandingError::MissingElement("#contactForm"))?;

        let form_clone = form.clone();
        dom::listen(&form, "submit", move |e: Event| {
            e.prevent_default();

            let submission = match read_form(&form_clone) {
                Ok(submission) => submission,
                Err(err) => {
                    log::error!("Could not read contact form: {}", err);
                    notifier.error(ERROR_MESSAGE);
                    return;
                }
            };

            match submission.validate() {
                Ok(()) => {
                    notifier.success(SUCCESS_MESSAGE);
                    form_clone.reset();
                    log_submission(&submission);
                }
                Err(reason) => {
                    log::debug!("Rejected contact form: {}", reason);
                    notifier.error(ERROR_MESSAGE);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, interest: &str, message: &str) -> ContactSubmission {
        ContactSubmission::from_pairs([
            ("name", name),
            ("email", email),
            ("interest", interest),
            ("message", message),
        ])
    }

    #[test]
    fn well_formed_submission_is_valid() {
        assert_eq!(submission("Ann", "ann@x.com", "trading", "hi").validate(), Ok(()));
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert_eq!(
            submission("Ann", "bad-email", "trading", "hi").validate(),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn each_missing_field_is_rejected() {
        let cases = [
            (submission("", "ann@x.com", "trading", "hi"), "name"),
            (submission("Ann", "", "trading", "hi"), "email"),
            (submission("Ann", "ann@x.com", "", "hi"), "interest"),
            (submission("Ann", "ann@x.com", "trading", ""), "message"),
        ];
        for (candidate, field) in cases {
            assert_eq!(candidate.validate(), Err(ValidationError::MissingField(field)));
        }
    }

    #[test]
    fn absent_fields_count_as_empty() {
        let partial = ContactSubmission::from_pairs([("name", "Ann"), ("email", "ann@x.com")]);
        assert_eq!(partial.validate(), Err(ValidationError::MissingField("interest")));
    }

    #[test]
    fn email_whitespace_follows_the_browser() {
        assert!(!is_valid_email("a\u{feff}b@c.com"));
        assert!(!is_valid_email("a\u{a0}b@c.com"));
        assert!(!is_valid_email("a@c\u{2009}d.com"));
        assert!(!is_valid_email("a@c.co\u{0b}m"));
        assert!(is_valid_email("a\u{85}b@c.com"));
        assert!(is_valid_email("a\u{180e}b@c.com"));
    }

    #[test]
    fn email_pattern_edges() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a@b.c "));
    }

    #[test]
    fn unknown_fields_are_kept_for_logging() {
        let parsed = ContactSubmission::from_pairs([
            ("name", "Ann"),
            ("email", "ann@x.com"),
            ("interest", "trading"),
            ("message", "hi"),
            ("company", "Acme"),
        ]);
        assert_eq!(parsed.extra.get("company").map(String::as_str), Some("Acme"));

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["company"], "Acme");
        assert_eq!(json["interest"], "trading");
    }
}
