use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub const HARDENED: u32 = 0x8000_0000;

/// BIP-32 derivation path, as a list of child numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// `44'/60'/0'/0/0`: first address of the first Ethereum account.
    pub fn ethereum_first_address() -> Self {
        Self(vec![44 | HARDENED, 60 | HARDENED, HARDENED, 0, 0])
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Representation without the `m/` prefix, as Ledger applications expect it.
    pub fn to_relative_string(&self) -> String {
        self.0
            .iter()
            .map(|c| {
                if c & HARDENED != 0 {
                    format!("{}'", c & !HARDENED)
                } else {
                    c.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Default for DerivationPath {
    fn default() -> Self {
        Self::ethereum_first_address()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m/{}", self.to_relative_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Derivation path is empty")]
    Empty,
    #[error("Invalid derivation path component '{0}'")]
    InvalidComponent(String),
    #[error("Derivation path has {0} components, at most 10 allowed")]
    TooDeep(usize),
}

// Ledger applications refuse paths longer than this.
const MAX_DEPTH: usize = 10;

impl FromStr for DerivationPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix("m/")
            .or_else(|| s.strip_prefix("M/"))
            .unwrap_or(s);
        if s.is_empty() || s == "m" {
            return Err(PathError::Empty);
        }
        let mut components = Vec::new();
        for part in s.split('/') {
            let (index, hardened) = match part
                .strip_suffix('\'')
                .or_else(|| part.strip_suffix('h'))
                .or_else(|| part.strip_suffix('H'))
            {
                Some(index) => (index, true),
                None => (part, false),
            };
            let index = u32::from_str(index)
                .ok()
                .filter(|i| i & HARDENED == 0)
                .ok_or_else(|| PathError::InvalidComponent(part.to_string()))?;
            components.push(if hardened { index | HARDENED } else { index });
        }
        if components.len() > MAX_DEPTH {
            return Err(PathError::TooDeep(components.len()));
        }
        Ok(Self(components))
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Self::from_str(&string).map_err(|e| {
            de::Error::custom(format!("Error parsing derivation path '{}': '{}'", string, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_derivation_path() {
        let default = DerivationPath::ethereum_first_address();
        assert_eq!(DerivationPath::from_str("m/44'/60'/0'/0/0"), Ok(default.clone()));
        assert_eq!(DerivationPath::from_str("44'/60'/0'/0/0"), Ok(default.clone()));
        assert_eq!(DerivationPath::from_str("m/44h/60h/0h/0/0"), Ok(default.clone()));
        assert_eq!(
            DerivationPath::from_str("44'/60'/1'/0/3").unwrap().components(),
            &[44 | HARDENED, 60 | HARDENED, 1 | HARDENED, 0, 3]
        );

        assert_eq!(DerivationPath::from_str("m/"), Err(PathError::Empty));
        assert_eq!(DerivationPath::from_str(""), Err(PathError::Empty));
        assert_eq!(
            DerivationPath::from_str("m/44'/x/0"),
            Err(PathError::InvalidComponent("x".to_string()))
        );
        assert_eq!(
            DerivationPath::from_str("m/44'//0"),
            Err(PathError::InvalidComponent("".to_string()))
        );
        // Index already has the hardened bit set.
        assert!(DerivationPath::from_str("m/2147483648").is_err());
        assert_eq!(
            DerivationPath::from_str("0/1/2/3/4/5/6/7/8/9/10"),
            Err(PathError::TooDeep(11))
        );
    }

    #[test]
    fn display_derivation_path() {
        let path = DerivationPath::ethereum_first_address();
        assert_eq!(path.to_string(), "m/44'/60'/0'/0/0");
        assert_eq!(path.to_relative_string(), "44'/60'/0'/0/0");
        assert_eq!(DerivationPath::from_str(&path.to_string()), Ok(path));
    }
}
