use std::collections::HashMap;

/// An uploaded file from a posted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Posted form fields and uploaded files for one submission.
///
/// Field names repeat for multi-select inputs, so each name maps to a list
/// of values. Forms read their own fields through a namespace prefix of
/// `{survey_id}_{question_id}`, which keeps questions from colliding when a
/// page renders several surveys.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Create an empty form data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field value; repeated names accumulate.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Attach an uploaded file.
    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(name.into(), file);
        self
    }

    /// Get the first value for a field, if any.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Get every value posted under a field name.
    pub fn values(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the uploaded file for a field, if any.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}

/// Whether a form carries posted input or only enumerates its fields.
///
/// Preview/test mode builds unbound forms with no data or files, purely to
/// enumerate the expected fields.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'a> {
    Bound(&'a FormData),
    Unbound,
}

impl<'a> Binding<'a> {
    /// Check if this binding carries posted input.
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    /// First value of a namespaced field.
    pub fn value(&self, prefix: &str, field: &str) -> Option<&'a str> {
        match self {
            Self::Bound(data) => data.value(&field_name(prefix, field)),
            Self::Unbound => None,
        }
    }

    /// All values of a namespaced field.
    pub fn list(&self, prefix: &str, field: &str) -> &'a [String] {
        match self {
            Self::Bound(data) => data.values(&field_name(prefix, field)),
            Self::Unbound => &[],
        }
    }

    /// Uploaded file of a namespaced field.
    pub fn file(&self, prefix: &str, field: &str) -> Option<&'a UploadedFile> {
        match self {
            Self::Bound(data) => data.file(&field_name(prefix, field)),
            Self::Unbound => None,
        }
    }
}

/// The full posted name of a namespaced field.
pub fn field_name(prefix: &str, field: &str) -> String {
    format!("{prefix}-{field}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names_accumulate() {
        let data = FormData::new()
            .with_value("1_2-answer", "red")
            .with_value("1_2-answer", "blue");

        assert_eq!(data.value("1_2-answer"), Some("red"));
        assert_eq!(data.values("1_2-answer"), ["red", "blue"]);
    }

    #[test]
    fn unbound_binding_sees_nothing() {
        let binding = Binding::Unbound;
        assert!(binding.value("1_2", "answer").is_none());
        assert!(binding.list("1_2", "answer").is_empty());
        assert!(binding.file("1_2", "answer").is_none());
    }

    #[test]
    fn namespace_prefix_separates_questions() {
        let data = FormData::new()
            .with_value("1_2-answer", "first")
            .with_value("1_3-answer", "second");
        let binding = Binding::Bound(&data);

        assert_eq!(binding.value("1_2", "answer"), Some("first"));
        assert_eq!(binding.value("1_3", "answer"), Some("second"));
    }
}
