//! Supported storefront countries and their currency presentation

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Country {
    Argentina,
    Paraguay,
}

impl Country {
    /// ISO 3166-1 alpha-2 code, also the value persisted in the preference store.
    pub fn code(&self) -> &'static str {
        match self {
            Country::Argentina => "AR",
            Country::Paraguay => "PY",
        }
    }

    pub fn currency_code(&self) -> &'static str {
        match self {
            Country::Argentina => "ARS",
            Country::Paraguay => "PYG",
        }
    }

    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Country::Argentina => "$",
            Country::Paraguay => "Gs.",
        }
    }

    pub fn locale(&self) -> &'static str {
        match self {
            Country::Argentina => "es-AR",
            Country::Paraguay => "es-PY",
        }
    }

    /// Maps a geo-IP country code onto a supported country, `None` for anything else.
    pub fn from_detected(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        code.parse().ok()
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Country {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AR" => Ok(Country::Argentina),
            "PY" => Ok(Country::Paraguay),
            _ => Err(anyhow::anyhow!("Unsupported country: {}", s)),
        }
    }
}

impl TryFrom<String> for Country {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Country> for String {
    fn from(country: Country) -> Self {
        country.code().to_string()
    }
}
