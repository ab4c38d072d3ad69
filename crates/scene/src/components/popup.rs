use serde::Serialize;

/// Colored pill shown next to a value (AQI badges, pollutant readings).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub text: String,
    pub background: &'static str,
    pub foreground: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupRow {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl PopupRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            badge: None,
        }
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }
}

/// Structured popup content; the host decides the markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<&'static str>,
    pub rows: Vec<PopupRow>,
}

impl Popup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            accent: None,
            rows: Vec::new(),
        }
    }

    pub fn with_accent(mut self, color: &'static str) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn row(mut self, row: PopupRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}
