//! Salesforce field display types and their icon mapping.
//!
//! The catalog order below is the order filter options are presented in.
//! Values outside the catalog are preserved as [`DisplayType::Other`] so a
//! provider returning a newer platform type still round-trips.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Icon returned for types that are not in the catalog.
pub const UNKNOWN_TYPE_ICON: &str = "utility:question";

/// Display type of a field as reported by the schema provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisplayType {
    String,
    TextArea,
    Picklist,
    MultiPicklist,
    Date,
    DateTime,
    Time,
    Currency,
    Percent,
    Integer,
    Double,
    Email,
    Phone,
    Url,
    Id,
    Reference,
    Address,
    Geolocation,
    RichTextArea,
    Image,
    EncryptedString,
    Text,
    Boolean,
    /// A type name the catalog does not know about, kept verbatim.
    Other(String),
}

/// Every known display type in declared catalog order.
pub static KNOWN_DISPLAY_TYPES: [DisplayType; 23] = [
    DisplayType::String,
    DisplayType::TextArea,
    DisplayType::Picklist,
    DisplayType::MultiPicklist,
    DisplayType::Date,
    DisplayType::DateTime,
    DisplayType::Time,
    DisplayType::Currency,
    DisplayType::Percent,
    DisplayType::Integer,
    DisplayType::Double,
    DisplayType::Email,
    DisplayType::Phone,
    DisplayType::Url,
    DisplayType::Id,
    DisplayType::Reference,
    DisplayType::Address,
    DisplayType::Geolocation,
    DisplayType::RichTextArea,
    DisplayType::Image,
    DisplayType::EncryptedString,
    DisplayType::Text,
    DisplayType::Boolean,
];

impl DisplayType {
    /// Canonical upper-case name (`RICH_TEXT_AREA`, `BOOLEAN`, ...).
    pub fn as_str(&self) -> &str {
        match self {
            DisplayType::String => "STRING",
            DisplayType::TextArea => "TEXTAREA",
            DisplayType::Picklist => "PICKLIST",
            DisplayType::MultiPicklist => "MULTIPICKLIST",
            DisplayType::Date => "DATE",
            DisplayType::DateTime => "DATETIME",
            DisplayType::Time => "TIME",
            DisplayType::Currency => "CURRENCY",
            DisplayType::Percent => "PERCENT",
            DisplayType::Integer => "INTEGER",
            DisplayType::Double => "DOUBLE",
            DisplayType::Email => "EMAIL",
            DisplayType::Phone => "PHONE",
            DisplayType::Url => "URL",
            DisplayType::Id => "ID",
            DisplayType::Reference => "REFERENCE",
            DisplayType::Address => "ADDRESS",
            DisplayType::Geolocation => "GEOLOCATION",
            DisplayType::RichTextArea => "RICH_TEXT_AREA",
            DisplayType::Image => "IMAGE",
            DisplayType::EncryptedString => "ENCRYPTED_STRING",
            DisplayType::Text => "TEXT",
            DisplayType::Boolean => "BOOLEAN",
            DisplayType::Other(name) => name.as_str(),
        }
    }

    /// Resolves the utility icon for this type, falling back to
    /// [`UNKNOWN_TYPE_ICON`] for types outside the catalog.
    pub fn icon(&self) -> &'static str {
        match self {
            DisplayType::String | DisplayType::Text => "utility:text",
            DisplayType::TextArea => "utility:textarea",
            DisplayType::Picklist => "utility:picklist_choice",
            DisplayType::MultiPicklist => "utility:multi_picklist",
            DisplayType::Date => "utility:date_input",
            DisplayType::DateTime => "utility:date_time",
            DisplayType::Time => "utility:clock",
            DisplayType::Currency => "utility:currency",
            DisplayType::Percent => "utility:percent",
            DisplayType::Integer | DisplayType::Double => "utility:number_input",
            DisplayType::Email => "utility:email",
            DisplayType::Phone => "utility:call",
            DisplayType::Url => "utility:link",
            DisplayType::Id => "utility:key",
            DisplayType::Reference => "utility:record_lookup",
            DisplayType::Address => "utility:checkin",
            DisplayType::Geolocation => "utility:location",
            DisplayType::RichTextArea => "utility:display_rich_text",
            DisplayType::Image => "utility:image",
            DisplayType::EncryptedString => "utility:lock",
            DisplayType::Boolean => "utility:multi_select_checkbox",
            DisplayType::Other(_) => UNKNOWN_TYPE_ICON,
        }
    }

    /// Human label used by filter menus: `RICH_TEXT_AREA` becomes `rich text area`.
    pub fn filter_label(&self) -> String {
        self.as_str().replace('_', " ").to_lowercase()
    }

    /// Whether the type belongs to the fixed catalog.
    pub fn is_known(&self) -> bool {
        !matches!(self, DisplayType::Other(_))
    }

    /// Strict parse that rejects names outside the catalog.
    pub fn parse_known(name: &str) -> Option<DisplayType> {
        let parsed = DisplayType::from(name);
        parsed.is_known().then_some(parsed)
    }
}

impl From<&str> for DisplayType {
    fn from(value: &str) -> Self {
        KNOWN_DISPLAY_TYPES
            .iter()
            .find(|known| known.as_str() == value)
            .cloned()
            .unwrap_or_else(|| DisplayType::Other(value.to_string()))
    }
}

impl From<String> for DisplayType {
    fn from(value: String) -> Self {
        match DisplayType::from(value.as_str()) {
            DisplayType::Other(_) => DisplayType::Other(value),
            known => known,
        }
    }
}

impl From<DisplayType> for String {
    fn from(value: DisplayType) -> Self {
        match value {
            DisplayType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for DisplayType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DisplayType::from(s))
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_round_trip_through_from_str() {
        for known in &KNOWN_DISPLAY_TYPES {
            let parsed: DisplayType = known.as_str().parse().expect("infallible");
            assert_eq!(&parsed, known);
        }
    }

    #[test]
    fn unrecognized_type_keeps_name_and_falls_back_to_unknown_icon() {
        let other = DisplayType::from("COMBOBOX");
        assert_eq!(other, DisplayType::Other("COMBOBOX".into()));
        assert_eq!(other.icon(), UNKNOWN_TYPE_ICON);
        assert!(DisplayType::parse_known("COMBOBOX").is_none());
    }

    #[test]
    fn filter_label_replaces_underscores() {
        assert_eq!(DisplayType::RichTextArea.filter_label(), "rich text area");
        assert_eq!(DisplayType::Boolean.filter_label(), "boolean");
    }

    #[test]
    fn serializes_as_plain_string() {
        let encoded = serde_json::to_string(&DisplayType::EncryptedString).expect("encode");
        assert_eq!(encoded, "\"ENCRYPTED_STRING\"");
        let decoded: DisplayType = serde_json::from_str("\"DATETIME\"").expect("decode");
        assert_eq!(decoded, DisplayType::DateTime);
    }
}
