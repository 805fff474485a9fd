//! Country code → display name table.
//!
//! The table is an immutable value handed to whoever needs display names
//! (picker, reports); there is no global lookup.

use std::collections::HashMap;

const DEFAULT_NAMES: [(&str, &str); 28] = [
    ("AT", "Austria"),
    ("BE", "Belgium"),
    ("BG", "Bulgaria"),
    ("CH", "Switzerland"),
    ("CZ", "Czech Republic"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("EE", "Estonia"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("GR", "Greece"),
    ("HR", "Croatia"),
    ("HU", "Hungary"),
    ("IE", "Ireland"),
    ("IT", "Italy"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("LV", "Latvia"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("RO", "Romania"),
    ("SE", "Sweden"),
    ("SI", "Slovenia"),
    ("SK", "Slovakia"),
];

#[derive(Debug, Clone)]
pub struct CountryNames {
    names: HashMap<String, String>,
}

impl CountryNames {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(k, v)| (k.into().to_ascii_uppercase(), v.into()))
                .collect(),
        }
    }

    /// Country name for a code, or the code itself when unknown.
    pub fn name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names
            .get(&code.to_ascii_uppercase())
            .map(String::as_str)
            .unwrap_or(code)
    }

    /// `"AT_temperature"` → `"Austria Temperature"`.
    pub fn display_name(&self, column: &str) -> String {
        format!("{} Temperature", self.name(country_code(column)))
    }
}

impl Default for CountryNames {
    fn default() -> Self {
        Self::new(DEFAULT_NAMES)
    }
}

/// Country code prefix of a column name (`"AT_temperature"` → `"AT"`).
pub fn country_code(column: &str) -> &str {
    column.split('_').next().unwrap_or(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_uses_table_then_code() {
        let names = CountryNames::default();
        assert_eq!(names.display_name("AT_temperature"), "Austria Temperature");
        assert_eq!(names.display_name("XX_temperature"), "XX Temperature");
    }

    #[test]
    fn custom_table_is_case_insensitive() {
        let names = CountryNames::new([("is", "Iceland")]);
        assert_eq!(names.name("IS"), "Iceland");
        assert_eq!(names.name("AT"), "AT");
    }
}
