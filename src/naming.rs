use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Version;

/// Trailing `V<major>[.<minor>][.<patch>]` suffix of a deployment name.
static VERSION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"V[1-9+]((.{0,2}[0-9+]){0,2})$").expect("valid version suffix"));

pub const MINT_RATE_VAULT: &str = "VaultMintRate";

const TYPE_RENAMES: &[(&str, &str)] = &[
    ("YieldVaultMintRate", "YieldVault"),
    (MINT_RATE_VAULT, "Vault"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Name with the version suffix removed, before any rename.
    pub kind: String,
    pub version: Version,
}

impl ParsedName {
    pub fn published_kind(&self) -> &str {
        rename_type(&self.kind)
    }

    pub fn is_mint_rate_vault(&self) -> bool {
        self.kind == MINT_RATE_VAULT
    }
}

pub fn rename_type(kind: &str) -> &str {
    TYPE_RENAMES
        .iter()
        .find(|(raw, _)| *raw == kind)
        .map_or(kind, |&(_, published)| published)
}

pub fn parse_contract_name(name: Option<&str>) -> ParsedName {
    let Some(name) = name else {
        return ParsedName {
            kind: String::new(),
            version: Version::default(),
        };
    };

    match VERSION_SUFFIX.find(name) {
        Some(suffix) => ParsedName {
            kind: name[..suffix.start()].to_string(),
            // skip the leading 'V'
            version: parse_version(&suffix.as_str()[1..]),
        },
        None => ParsedName {
            kind: name.to_string(),
            version: Version::default(),
        },
    }
}

fn parse_version(digits: &str) -> Version {
    let mut groups = digits.split('.').map(|group| group.parse::<u64>().ok());

    let major = groups.next().flatten().unwrap_or(1);
    let minor = groups.next().flatten().unwrap_or(0);
    let patch = groups.next().flatten().unwrap_or(0);

    Version::new(major, minor, patch)
}
