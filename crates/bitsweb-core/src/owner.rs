//! Owner filter

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whose transactions are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    All,
    Travis,
    Dorothy,
}

impl Owner {
    pub const VARIANTS: [Owner; 3] = [Owner::All, Owner::Travis, Owner::Dorothy];

    /// `All` matches every owner; other variants compare case-insensitively
    pub fn matches(&self, owner: &str) -> bool {
        match self {
            Owner::All => true,
            _ => owner.trim().eq_ignore_ascii_case(self.as_str()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Owner::All => "All",
            Owner::Travis => "Travis",
            Owner::Dorothy => "Dorothy",
        }
    }
}

impl std::str::FromStr for Owner {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Owner::All),
            "travis" => Ok(Owner::Travis),
            "dorothy" => Ok(Owner::Dorothy),
            _ => Err(CoreError::InvalidOwner { value: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_parse() {
        assert_eq!("all".parse::<Owner>().unwrap(), Owner::All);
        assert_eq!(" Dorothy ".parse::<Owner>().unwrap(), Owner::Dorothy);
        assert_eq!("TRAVIS".parse::<Owner>().unwrap(), Owner::Travis);
        assert!("bob".parse::<Owner>().is_err());
        assert_eq!(Owner::default(), Owner::All);
    }

    #[test]
    fn test_owner_matches() {
        assert!(Owner::All.matches("anyone"));
        assert!(Owner::Travis.matches("travis"));
        assert!(!Owner::Travis.matches("Dorothy"));
    }
}
