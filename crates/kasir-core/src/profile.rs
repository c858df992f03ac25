//! # Store Profile
//!
//! The merchant identity block rendered onto receipts, plus the UI
//! preferences saved alongside it.
//!
//! Every field is optional in the saved document; an absent key falls
//! back to the default documented on [`StoreProfile::default`]. Loading
//! and saving live in the persistence crate; this type is pure data.

use serde::{Deserialize, Serialize};

/// Store identity and preferences.
///
/// ## Receipt Fields
/// `name`, `address`, `phone` and `footer` appear on printed receipts;
/// empty address/phone lines are skipped entirely.
///
/// ## Preference Fields
/// `theme` and `default_printer` belong to the settings screen and are
/// carried here so one document round-trips the whole profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreProfile {
    /// Store name, printed double-size at the top of receipts.
    pub name: String,

    /// Street address line.
    pub address: String,

    /// Contact phone number.
    pub phone: String,

    /// Closing line at the bottom of receipts.
    pub footer: String,

    /// UI color theme key.
    pub theme: String,

    /// Preferred printer name; empty means "ask every time".
    pub default_printer: String,
}

impl Default for StoreProfile {
    /// The out-of-the-box profile.
    ///
    /// | key             | default                          |
    /// |-----------------|----------------------------------|
    /// | name            | `TOKO SEJAHTERA`                 |
    /// | address         | `Jl. Contoh No. 123`             |
    /// | phone           | `08123456789`                    |
    /// | footer          | `Terima kasih telah berbelanja!` |
    /// | theme           | `blue`                           |
    /// | default_printer | (empty)                          |
    fn default() -> Self {
        StoreProfile {
            name: "TOKO SEJAHTERA".to_string(),
            address: "Jl. Contoh No. 123".to_string(),
            phone: "08123456789".to_string(),
            footer: "Terima kasih telah berbelanja!".to_string(),
            theme: "blue".to_string(),
            default_printer: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = StoreProfile::default();
        assert_eq!(profile.name, "TOKO SEJAHTERA");
        assert_eq!(profile.footer, "Terima kasih telah berbelanja!");
        assert_eq!(profile.theme, "blue");
        assert!(profile.default_printer.is_empty());
    }

    #[test]
    fn test_absent_keys_fall_back_to_defaults() {
        let profile: StoreProfile =
            serde_json::from_str(r#"{"name": "WARUNG BU SITI"}"#).unwrap();
        assert_eq!(profile.name, "WARUNG BU SITI");
        // Everything not in the document keeps its default.
        assert_eq!(profile.address, "Jl. Contoh No. 123");
        assert_eq!(profile.phone, "08123456789");
        assert_eq!(profile.theme, "blue");
    }

    #[test]
    fn test_round_trip() {
        let mut profile = StoreProfile::default();
        profile.name = "WARUNG BU SITI".to_string();
        profile.default_printer = "EPSON TM-T82".to_string();

        let json = serde_json::to_string(&profile).unwrap();
        let back: StoreProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
