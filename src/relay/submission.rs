//! Inbound form submission.

/// Name of the hidden honeypot input.
pub const HONEYPOT_FIELD: &str = "bot-field";

/// Fields read from a contact form post. Anything missing stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub country: String,
    pub category: String,
    pub bot_field: Option<String>,
}

impl FormSubmission {
    /// Build a submission from form pairs in body order.
    ///
    /// A repeated key keeps its last value. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "name" => submission.name = value,
                "email" => submission.email = value,
                "phone" => submission.phone = value,
                "message" => submission.message = value,
                "country" => submission.country = value,
                "category" => submission.category = value,
                HONEYPOT_FIELD => submission.bot_field = Some(value),
                _ => {}
            }
        }
        submission
    }

    /// True when the honeypot was filled in. Humans never see the field.
    pub fn is_bot_suspected(&self) -> bool {
        self.bot_field.as_deref().is_some_and(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let submission = FormSubmission::from_pairs([("name", "Ada"), ("unknown", "x")]);
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email, "");
        assert_eq!(submission.category, "");
        assert_eq!(submission.bot_field, None);
    }

    #[test]
    fn test_last_value_wins() {
        let submission =
            FormSubmission::from_pairs([("email", "first@example.com"), ("email", "second@example.com")]);
        assert_eq!(submission.email, "second@example.com");
    }

    #[test]
    fn test_honeypot() {
        let empty = FormSubmission::from_pairs([(HONEYPOT_FIELD, "")]);
        assert!(!empty.is_bot_suspected());

        let absent = FormSubmission::from_pairs(Vec::<(String, String)>::new());
        assert!(!absent.is_bot_suspected());

        let filled = FormSubmission::from_pairs([(HONEYPOT_FIELD, "http://spam.example")]);
        assert!(filled.is_bot_suspected());

        // Whitespace is still content a human could not have typed.
        let blank = FormSubmission::from_pairs([(HONEYPOT_FIELD, " ")]);
        assert!(blank.is_bot_suspected());
    }
}
