//! Contact form state machine.
//!
//! Submission is simulated: a fixed network wait, a success message that
//! lingers, then the form resets itself. The wait is not cancellable and a
//! second submit during it is rejected.

use thiserror::Error;

const SUBMIT_SECS: f32 = 1.5;
const SENT_LINGER_SECS: f32 = 3.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("name is required")]
    EmptyName,
    #[error("message is required")]
    EmptyMessage,
    #[error("email address is malformed")]
    BadEmail,
    #[error("a submission is already in flight")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FormState {
    #[default]
    Idle,
    /// Seconds of simulated network wait remaining.
    Submitting(f32),
    /// Seconds the success message stays up before the form resets.
    Sent(f32),
}

#[derive(Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    state: FormState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state(), FormState::Submitting(_))
    }

    /// Validate and start the simulated submission.
    pub fn submit(&mut self) -> Result<(), ContactError> {
        if self.is_submitting() {
            return Err(ContactError::AlreadySubmitting);
        }
        if self.name.trim().is_empty() {
            return Err(ContactError::EmptyName);
        }
        if !is_plausible_email(&self.email) {
            return Err(ContactError::BadEmail);
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::EmptyMessage);
        }
        log::info!("contact: submitting message from {}", self.email);
        self.state = FormState::Submitting(SUBMIT_SECS);
        Ok(())
    }

    /// Advance the simulated wait and the sent linger. Call once per frame.
    pub fn tick(&mut self, dt: f32) {
        self.state = match self.state {
            FormState::Idle => FormState::Idle,
            FormState::Submitting(remaining) => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    log::info!("contact: message sent");
                    FormState::Sent(SENT_LINGER_SECS)
                } else {
                    FormState::Submitting(remaining)
                }
            }
            FormState::Sent(remaining) => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.name.clear();
                    self.email.clear();
                    self.message.clear();
                    FormState::Idle
                } else {
                    FormState::Sent(remaining)
                }
            }
        };
    }
}

/// Good enough for form feedback: something before and after a single `@`,
/// and a dot in the domain.
fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        _ => false,
    }
}
