use super::Selection;

pub type CustomCheck = Box<dyn Fn(&[&Selection]) -> RuleVerdict + Send + Sync>;

/// Completion requirements for one puzzle. Defined once at startup, never
/// mutated afterwards.
pub struct SelectionRule {
    pub min_selections: usize,
    pub max_selections: Option<usize>,
    pub required_keys: Vec<String>,
    pub max_points: Option<i32>,
    pub message: String,
    pub custom: Option<CustomCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVerdict {
    pub valid: bool,
    pub message: String,
    pub missing_keys: Vec<String>,
    pub count: usize,
}

impl RuleVerdict {
    pub fn ok(count: usize) -> Self {
        Self {
            valid: true,
            message: String::new(),
            missing_keys: Vec::new(),
            count,
        }
    }

    pub fn fail(message: impl Into<String>, missing_keys: Vec<String>, count: usize) -> Self {
        Self {
            valid: false,
            message: message.into(),
            missing_keys,
            count,
        }
    }
}

impl SelectionRule {
    pub fn new(min_selections: usize) -> Self {
        Self {
            min_selections,
            max_selections: None,
            required_keys: Vec::new(),
            max_points: None,
            message: String::new(),
            custom: None,
        }
    }

    pub fn max_selections(mut self, max: usize) -> Self {
        self.max_selections = Some(max);
        self
    }

    pub fn required_keys(mut self, keys: &[&str]) -> Self {
        self.required_keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn max_points(mut self, max: i32) -> Self {
        self.max_points = Some(max);
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    /// Multi-part requirements (e.g. "two actions in three of four
    /// categories") fully override the default count/key logic.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&[&Selection]) -> RuleVerdict + Send + Sync + 'static,
    {
        self.custom = Some(Box::new(check));
        self
    }

    pub fn check(&self, selections: &[&Selection]) -> RuleVerdict {
        if let Some(custom) = &self.custom {
            return custom(selections);
        }

        let count = selections.len();

        // Missing required keys are the most actionable diagnostic, so they
        // win over plain count shortfalls.
        let missing: Vec<String> = self
            .required_keys
            .iter()
            .filter(|key| !selections.iter().any(|s| s.selection_id == key.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return RuleVerdict::fail(
                format!("Missing required selections: {}", missing.join(", ")),
                missing,
                count,
            );
        }

        if count < self.min_selections {
            return RuleVerdict::fail(self.failure_message(), Vec::new(), count);
        }
        if let Some(max) = self.max_selections {
            if count > max {
                return RuleVerdict::fail(
                    format!("Select at most {} options", max),
                    Vec::new(),
                    count,
                );
            }
        }

        RuleVerdict::ok(count)
    }

    fn failure_message(&self) -> String {
        if self.message.is_empty() {
            format!("Select at least {} options", self.min_selections)
        } else {
            self.message.clone()
        }
    }
}
