#![forbid(unsafe_code)]

//! Demo contact form.
//!
//! Submission is a placeholder: fields are snapshotted and logged, the form is
//! replaced by an acknowledgement, and nothing leaves the page. Wiring a real
//! endpoint means sending the returned [`ContactSubmission`] somewhere before
//! showing the acknowledgement.

use serde::Serialize;

use crate::error::{FolioError, Result};
use crate::node::{UiDocument, UiNode};

pub const SUCCESS_CLASS: &str = "success-message";
pub const SUCCESS_TEXT: &str = "Thank you for your message! I will get back to you soon.";

/// Field values captured at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Intercepts submission of the contact form.
#[derive(Debug, Clone)]
pub struct ContactFormDemo<N> {
    form: N,
    field_ids: [String; 4],
}

impl<N: UiNode> ContactFormDemo<N> {
    /// `field_ids` are the name, email, subject and message ids, in order.
    #[must_use]
    pub fn new(form: N, field_ids: [String; 4]) -> Self {
        Self { form, field_ids }
    }

    /// Handle one submission.
    ///
    /// Every field must exist; a missing one fails the whole submission with
    /// [`FolioError::MissingField`] and leaves the form as it was.
    pub fn submit<D>(&self, document: &D) -> Result<ContactSubmission>
    where
        D: UiDocument<Node = N>,
    {
        let read = |id: &str| -> Result<String> {
            document
                .element_by_id(id)
                .map(|field| field.value().unwrap_or_default())
                .ok_or_else(|| FolioError::MissingField(id.to_string()))
        };
        let [name, email, subject, message] = &self.field_ids;
        let submission = ContactSubmission {
            name: read(name.as_str())?,
            email: read(email.as_str())?,
            subject: read(subject.as_str())?,
            message: read(message.as_str())?,
        };
        tracing::info!(
            target: "folio.contact",
            name = %submission.name,
            email = %submission.email,
            subject = %submission.subject,
            message_len = submission.message.len(),
            "contact form submitted (demo, not sent)"
        );

        let ack = document.create_element("div")?;
        ack.add_class(SUCCESS_CLASS);
        ack.set_text(SUCCESS_TEXT);
        self.form.clear_children();
        self.form.append_child(&ack)?;
        Ok(submission)
    }
}
