pub mod log;

use crate::{Error, Result};
use lazy_regex::regex_is_match;
use std::{fs, path::Path};

pub fn validate_domain(domain: &str) -> Result<String> {
    let domain = domain.trim().trim_end_matches('.').to_lowercase();
    if regex_is_match!(
        r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)+$",
        &domain
    ) {
        Ok(domain)
    } else {
        Err(Error::InvalidDomain(domain))
    }
}

pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        Ok(false)
    } else {
        fs::create_dir_all(dir)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_dir, validate_domain};
    use crate::Error;

    #[test]
    fn normalizes_valid_domains() {
        assert_eq!("example.com", validate_domain("Example.COM.").unwrap());
        assert_eq!(
            "a-b.sub.example.co.uk",
            validate_domain(" a-b.sub.example.co.uk ").unwrap()
        );
    }

    #[test]
    fn rejects_invalid_domains() {
        for domain in [
            "",
            "localhost",
            "-bad.com",
            "bad-.com",
            "a..com",
            "*.example.com",
            "http://example.com",
        ] {
            assert!(
                matches!(validate_domain(domain), Err(Error::InvalidDomain(_))),
                "{domain} should be rejected"
            );
        }
    }

    #[test]
    fn creates_missing_dir_once() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("output/subscraping/example.com");

        assert!(ensure_dir(&dir).unwrap());
        assert!(dir.is_dir());
        assert!(!ensure_dir(&dir).unwrap());
    }
}
