//! Sign-up form validation and the simulated submission.
//!
//! Validation uses an explicit rule set derived from the input's attributes
//! (`required`, `type`, `pattern`, `minlength`, `maxlength`) so that the same
//! classification runs on the host as in the browser.

use std::sync::OnceLock;

use regex::Regex;

use crate::timing::{Deadline, Millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Url,
    Tel,
    Number,
}

impl InputKind {
    /// Maps an input's `type` attribute; unknown types validate like text.
    pub fn from_type_attr(ty: &str) -> Self {
        match ty.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "url" => Self::Url,
            "tel" => Self::Tel,
            "number" => Self::Number,
            _ => Self::Text,
        }
    }

    fn accepts(self, value: &str) -> bool {
        match self {
            Self::Text | Self::Tel => true,
            Self::Email => email_regex().is_match(value),
            Self::Url => url_regex().is_match(value),
            Self::Number => value.trim().parse::<f64>().is_ok_and(f64::is_finite),
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email pattern compiles")
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:\S+$").expect("url pattern compiles"))
}

#[derive(Debug, Clone)]
pub enum Rule {
    Required,
    Kind(InputKind),
    /// Anchored to the whole value, as the `pattern` attribute is.
    Pattern(Regex),
    MinLength(usize),
    MaxLength(usize),
}

impl Rule {
    /// Compile a `pattern` attribute. Uncompilable patterns yield `None` and
    /// impose no constraint.
    pub fn pattern(source: &str) -> Option<Self> {
        match Regex::new(&format!("^(?:{source})$")) {
            Ok(re) => Some(Self::Pattern(re)),
            Err(err) => {
                tracing::warn!(pattern = source, %err, "ignoring invalid pattern attribute");
                None
            }
        }
    }

    fn passes(&self, value: &str) -> bool {
        if value.is_empty() {
            return !matches!(self, Self::Required);
        }
        match self {
            Self::Required => true,
            Self::Kind(kind) => kind.accepts(value),
            Self::Pattern(re) => re.is_match(value),
            Self::MinLength(n) => value.chars().count() >= *n,
            Self::MaxLength(n) => value.chars().count() <= *n,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldSpec {
    rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build the rule set from raw input attributes.
    pub fn from_attributes(
        ty: Option<&str>,
        required: bool,
        pattern: Option<&str>,
        min_length: Option<&str>,
        max_length: Option<&str>,
    ) -> Self {
        let mut rules = Vec::new();
        if required {
            rules.push(Rule::Required);
        }
        if let Some(ty) = ty {
            rules.push(Rule::Kind(InputKind::from_type_attr(ty)));
        }
        if let Some(rule) = pattern.and_then(Rule::pattern) {
            rules.push(rule);
        }
        if let Some(n) = min_length.and_then(|v| v.trim().parse().ok()) {
            rules.push(Rule::MinLength(n));
        }
        if let Some(n) = max_length.and_then(|v| v.trim().parse().ok()) {
            rules.push(Rule::MaxLength(n));
        }
        Self { rules }
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.rules.iter().all(|r| r.passes(value))
    }

    pub fn classify(&self, value: &str) -> FieldClass {
        if value.is_empty() {
            FieldClass::Empty
        } else if self.is_valid(value) {
            FieldClass::Valid
        } else {
            FieldClass::Invalid
        }
    }
}

/// Presentation class for a field; `Empty` carries neither class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    Valid,
    Invalid,
    Empty,
}

impl FieldClass {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }

    pub fn is_invalid(self) -> bool {
        self == Self::Invalid
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    spec: FieldSpec,
    value: String,
    class: FieldClass,
}

impl Field {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn class(&self) -> FieldClass {
        self.class
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Some field failed validation; nothing else changes.
    Blocked { invalid: Vec<usize> },
    /// Button is busy until the delay elapses.
    Started,
    /// A submission is already in flight.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub notice: String,
}

#[derive(Debug)]
struct Pending {
    original_label: String,
    deadline: Deadline,
}

/// The form's fields and submit button, as the shell mirrors them.
#[derive(Debug)]
pub struct Form {
    fields: Vec<Field>,
    label: String,
    disabled: bool,
    busy_label: String,
    notice: String,
    delay: Millis,
    pending: Option<Pending>,
}

impl Form {
    pub fn new(
        specs: Vec<FieldSpec>,
        label: impl Into<String>,
        busy_label: impl Into<String>,
        notice: impl Into<String>,
        delay: Millis,
    ) -> Self {
        Self {
            fields: specs
                .into_iter()
                .map(|spec| Field {
                    spec,
                    value: String::new(),
                    class: FieldClass::Empty,
                })
                .collect(),
            label: label.into(),
            disabled: false,
            busy_label: busy_label.into(),
            notice: notice.into(),
            delay,
            pending: None,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a keystroke's new value and reclassify the field.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Option<FieldClass> {
        let field = self.fields.get_mut(index)?;
        field.value = value.into();
        field.class = field.spec.classify(&field.value);
        Some(field.class)
    }

    /// Validate every field and, when all pass, enter the busy state.
    pub fn submit(&mut self, now: Millis) -> SubmitOutcome {
        if self.pending.is_some() {
            return SubmitOutcome::Busy;
        }
        let mut invalid = Vec::new();
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.class = field.spec.classify(&field.value);
            if !field.spec.is_valid(&field.value) {
                invalid.push(i);
            }
        }
        if !invalid.is_empty() {
            return SubmitOutcome::Blocked { invalid };
        }
        let original_label = std::mem::replace(&mut self.label, self.busy_label.clone());
        self.disabled = true;
        self.pending = Some(Pending {
            original_label,
            deadline: Deadline::after(now, self.delay),
        });
        tracing::info!(fields = self.fields.len(), "simulated submission started");
        SubmitOutcome::Started
    }

    /// Finish the submission if its delay has elapsed at `now`. The browser
    /// calls this from the timeout armed when the submission started.
    pub fn poll(&mut self, now: Millis) -> Option<Completion> {
        if self.pending.as_ref()?.deadline.is_due(now) {
            self.complete()
        } else {
            None
        }
    }

    /// Restore the button and reset fields.
    fn complete(&mut self) -> Option<Completion> {
        let pending = self.pending.take()?;
        self.label = pending.original_label;
        self.disabled = false;
        for field in &mut self.fields {
            field.value.clear();
            field.class = FieldClass::Empty;
        }
        tracing::info!("simulated submission complete");
        Some(Completion {
            notice: self.notice.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::{Clock, ManualClock};

    fn email() -> FieldSpec {
        FieldSpec::from_attributes(Some("email"), true, None, None, None)
    }

    fn name() -> FieldSpec {
        FieldSpec::from_attributes(Some("text"), true, None, Some("2"), None)
    }

    fn signup() -> Form {
        Form::new(vec![name(), email()], "JOIN", "TRANSMITTING...", "DONE", 1500.0)
    }

    #[test]
    fn empty_is_neither_valid_nor_invalid() {
        assert_eq!(email().classify(""), FieldClass::Empty);
        assert!(!email().is_valid(""));
        assert!(FieldSpec::default().is_valid(""));
    }

    #[test]
    fn bad_email_is_never_valid() {
        for bad in ["plain", "a@", "@b.com", "a b@c.com", "a@-b.com"] {
            assert_eq!(email().classify(bad), FieldClass::Invalid, "{bad}");
        }
        assert_eq!(email().classify("ceo@startup.io"), FieldClass::Valid);
    }

    #[test]
    fn pattern_matches_whole_value() {
        let spec = FieldSpec::from_attributes(None, false, Some("[0-9]{3}"), None, None);
        assert!(spec.is_valid("123"));
        assert!(!spec.is_valid("1234"));
        assert!(!spec.is_valid("x123"));
    }

    #[test]
    fn invalid_pattern_imposes_nothing() {
        let spec = FieldSpec::from_attributes(None, false, Some("(unclosed"), None, None);
        assert!(spec.is_valid("anything"));
    }

    #[test]
    fn lengths_and_kinds() {
        let spec = FieldSpec::from_attributes(Some("number"), false, None, None, Some("3"));
        assert!(spec.is_valid("42"));
        assert!(!spec.is_valid("4200"));
        assert!(!spec.is_valid("forty"));
        let url = FieldSpec::from_attributes(Some("URL"), false, None, None, None);
        assert!(url.is_valid("https://example.com"));
        assert!(!url.is_valid("example dot com"));
    }

    #[test]
    fn valid_submit_goes_busy_then_resets() {
        let clock = ManualClock::new(0.0);
        let mut form = signup();
        form.set_value(0, "Ada");
        assert_eq!(form.set_value(1, "ada@x.io"), Some(FieldClass::Valid));

        assert_eq!(form.submit(clock.now()), SubmitOutcome::Started);
        assert_eq!(form.label(), "TRANSMITTING...");
        assert!(form.is_disabled());
        assert_eq!(form.submit(clock.now()), SubmitOutcome::Busy);

        clock.advance(1498.0);
        assert_eq!(form.poll(clock.now()), None);
        clock.advance(2.0);
        let done = form.poll(clock.now()).unwrap();
        assert_eq!(done.notice, "DONE");
        assert_eq!(form.label(), "JOIN");
        assert!(!form.is_disabled());
        assert!(form
            .fields()
            .iter()
            .all(|f| f.value().is_empty() && f.class() == FieldClass::Empty));
        assert_eq!(form.poll(clock.now()), None);
    }

    #[test]
    fn timeout_sampled_just_before_deadline_completes() {
        let mut form = signup();
        form.set_value(0, "Ada");
        form.set_value(1, "ada@x.io");
        assert_eq!(form.submit(200.0), SubmitOutcome::Started);
        assert_eq!(form.poll(200.0 + 1499.6).map(|c| c.notice), Some("DONE".to_owned()));
        assert!(!form.is_busy());
    }

    #[test]
    fn poll_without_submission_is_none() {
        let mut form = signup();
        assert_eq!(form.poll(1e9), None);
        assert_eq!(form.label(), "JOIN");
    }

    #[test]
    fn invalid_submit_changes_nothing() {
        let mut form = signup();
        form.set_value(0, "Ada");
        form.set_value(1, "not-an-email");
        assert_eq!(form.submit(0.0), SubmitOutcome::Blocked { invalid: vec![1] });
        assert_eq!(form.label(), "JOIN");
        assert!(!form.is_disabled());
        assert!(!form.is_busy());
        assert_eq!(form.fields()[1].value(), "not-an-email");
    }

    #[test]
    fn empty_required_field_blocks_submit() {
        let mut form = signup();
        form.set_value(0, "Ada");
        assert_eq!(form.submit(0.0), SubmitOutcome::Blocked { invalid: vec![1] });
        assert_eq!(form.fields()[1].class(), FieldClass::Empty);
    }
}
