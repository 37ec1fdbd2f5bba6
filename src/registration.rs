//! Registration form state
//!
//! The form is a plain value updated through [`FormAction`]s so the browser
//! page and the CLI share the same validation and submission flow:
//!
//! ```text
//! Idle --submit--> Submitting --ok--> Confirmed --close--> Idle (cleared)
//!                             \-err-> Failed (fields kept)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::attendee::{NewInvite, CONTACT_MAX_DIGITS};

/// Text shown in the confirmation dialog
pub const CONFIRMATION_TITLE: &str = "Participação Confirmada!";
pub const CONFIRMATION_MESSAGE: &str = "Estamos muito felizes em ter você conosco neste evento especial! \
Juntos, vamos construir um futuro financeiro mais inclusivo.";

/// Alert shown when the directory rejects or cannot be reached
pub const SUBMIT_FAILED_MESSAGE: &str = "Erro ao registrar participação. Tente novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Location,
    Contact,
    Business,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Name => "Nome",
            FormField::Location => "Localização",
            FormField::Contact => "Contacto",
            FormField::Business => "Negócio",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Edit(FormField, String),
    Reset,
}

/// Why a form cannot be submitted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} é obrigatório")]
    Required(FormField),

    #[error("Contacto deve conter apenas dígitos")]
    ContactNotNumeric,

    #[error("Contacto deve ter no máximo {max} dígitos")]
    ContactTooLong { max: usize },
}

/// Progress of the current submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Confirmed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub location: String,
    pub contact: String,
    pub business: String,
    pub status: SubmitStatus,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(mut self, action: FormAction) -> Self {
        match action {
            FormAction::Edit(field, value) => {
                match field {
                    FormField::Name => self.name = value,
                    FormField::Location => self.location = value,
                    FormField::Contact => self.contact = value,
                    FormField::Business => self.business = value,
                }
                // editing after a failure clears the alert, fields stay as typed
                if matches!(self.status, SubmitStatus::Failed(_)) {
                    self.status = SubmitStatus::Idle;
                }
                self
            }
            FormAction::Reset => Self::default(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Location => &self.location,
            FormField::Contact => &self.contact,
            FormField::Business => &self.business,
        }
    }

    /// Check the required fields and build the request body
    ///
    /// Values are trimmed; an empty business is sent as an empty string.
    pub fn validate(&self) -> Result<NewInvite, ValidationError> {
        for field in [FormField::Name, FormField::Location, FormField::Contact] {
            if self.value(field).trim().is_empty() {
                return Err(ValidationError::Required(field));
            }
        }

        let contact = self.contact.trim();
        if !contact.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::ContactNotNumeric);
        }
        if contact.len() > CONTACT_MAX_DIGITS {
            return Err(ValidationError::ContactTooLong {
                max: CONTACT_MAX_DIGITS,
            });
        }

        Ok(NewInvite {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            contact: contact.to_string(),
            business: self.business.trim().to_string(),
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Validate and move to `Submitting`
    ///
    /// Returns the body to send. A submission already in flight is not
    /// started twice.
    pub fn begin_submit(&mut self) -> Result<Option<NewInvite>, ValidationError> {
        if self.is_submitting() {
            return Ok(None);
        }

        let invite = self.validate()?;
        self.status = SubmitStatus::Submitting;
        Ok(Some(invite))
    }

    pub fn confirm(&mut self) {
        self.status = SubmitStatus::Confirmed;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SubmitStatus::Failed(message.into());
    }

    /// Close the confirmation dialog, clearing the form
    pub fn close_confirmation(&mut self) {
        if self.status == SubmitStatus::Confirmed {
            *self = Self::default();
        }
    }
}

/// Keep only the digits of typed contact input, capped at the maximum length
pub fn sanitize_contact(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CONTACT_MAX_DIGITS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegistrationForm {
        RegistrationForm::new()
            .apply(FormAction::Edit(FormField::Name, "Ana Silva".into()))
            .apply(FormAction::Edit(FormField::Location, "Muhala".into()))
            .apply(FormAction::Edit(FormField::Contact, "841234567".into()))
    }

    #[test]
    fn test_valid_form_builds_invite() {
        let invite = filled().validate().unwrap();
        assert_eq!(
            invite,
            NewInvite {
                name: "Ana Silva".to_string(),
                location: "Muhala".to_string(),
                contact: "841234567".to_string(),
                business: String::new(),
            }
        );
    }

    #[test]
    fn test_required_fields() {
        let form = filled().apply(FormAction::Edit(FormField::Location, "   ".into()));
        assert_eq!(
            form.validate(),
            Err(ValidationError::Required(FormField::Location))
        );

        assert_eq!(
            RegistrationForm::new().validate(),
            Err(ValidationError::Required(FormField::Name))
        );
    }

    #[test]
    fn test_contact_rules() {
        let form = filled().apply(FormAction::Edit(FormField::Contact, "84 123".into()));
        assert_eq!(form.validate(), Err(ValidationError::ContactNotNumeric));

        let form = filled().apply(FormAction::Edit(FormField::Contact, "8412345678".into()));
        assert_eq!(
            form.validate(),
            Err(ValidationError::ContactTooLong { max: 9 })
        );
    }

    #[test]
    fn test_sanitize_contact() {
        assert_eq!(sanitize_contact("84-123 4567"), "841234567");
        assert_eq!(sanitize_contact("8412345678999"), "841234567");
        assert_eq!(sanitize_contact("abc"), "");
    }

    #[test]
    fn test_failure_keeps_fields() {
        let mut form = filled();
        assert!(form.begin_submit().unwrap().is_some());
        assert!(form.is_submitting());

        // a second click while in flight does nothing
        assert_eq!(form.begin_submit(), Ok(None));

        form.fail(SUBMIT_FAILED_MESSAGE);
        assert_eq!(form.status, SubmitStatus::Failed(SUBMIT_FAILED_MESSAGE.to_string()));
        assert_eq!(form.name, "Ana Silva");
        assert_eq!(form.contact, "841234567");

        let form = form.apply(FormAction::Edit(FormField::Business, "Padaria".into()));
        assert_eq!(form.status, SubmitStatus::Idle);
        assert_eq!(form.name, "Ana Silva");
    }

    #[test]
    fn test_closing_confirmation_resets() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.confirm();
        assert_eq!(form.status, SubmitStatus::Confirmed);

        form.close_confirmation();
        assert_eq!(form, RegistrationForm::default());
    }

    #[test]
    fn test_invalid_submit_stays_idle() {
        let mut form = RegistrationForm::new();
        assert!(form.begin_submit().is_err());
        assert_eq!(form.status, SubmitStatus::Idle);
    }
}
