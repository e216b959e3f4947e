use std::fmt;

use crate::domain::validation::ValidationError;

/// Fixed-width fill used when masking an [`ApiKey`], and the whole placeholder
/// for keys shorter than 4 characters.
const MASK_FILL: &str = "********";

#[derive(Clone, PartialEq, Eq, Hash)]
/// Kavenegar API key, the secret path segment of every request URL.
///
/// Invariant: non-empty after trimming. The masked form is computed once at
/// construction and is the only representation exposed by `Debug`/`Display`;
/// the raw secret is reachable only through [`ApiKey::secret`].
pub struct ApiKey {
    secret: String,
    masked: String,
}

impl ApiKey {
    /// Create a validated [`ApiKey`] and precompute its masked form.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "apikey" });
        }
        Ok(Self {
            masked: mask_secret(trimmed),
            secret: trimmed.to_owned(),
        })
    }

    /// Borrow the raw secret. Only the request URL builder should need this;
    /// anything user-visible must use [`ApiKey::masked`] instead.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Borrow the masked form (`AB********GH` style).
    pub fn masked(&self) -> &str {
        &self.masked
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked)
    }
}

/// First two and last two characters around a fixed fill; keys shorter than
/// 4 characters collapse to the fill alone. Character-based, so multi-byte
/// keys cannot split a code point.
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 4 {
        return MASK_FILL.to_owned();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}{MASK_FILL}{tail}")
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient identifier (`receptor`), passed to Kavenegar verbatim.
///
/// Invariant: non-empty after trimming. No phone-number normalization is
/// applied; the service accepts local and international forms as-is.
pub struct Receptor(String);

impl Receptor {
    /// Form field name used by Kavenegar (`receptor`).
    pub const FIELD: &'static str = "receptor";

    /// Create a validated [`Receptor`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated receptor.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`message`).
///
/// Invariant: non-empty after trimming. The original value (including
/// whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by Kavenegar (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Originating line number (`sender`).
///
/// Invariant: non-empty after trimming. The line must be enabled on your
/// Kavenegar account.
pub struct SenderLine(String);

impl SenderLine {
    /// Form field name used by Kavenegar (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Create a validated [`SenderLine`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender line.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Outbound proxy descriptor, e.g. `http://10.0.0.1:3128` or `socks5://...`.
///
/// Invariant: parses as an absolute URL.
pub struct ProxyUrl(String);

impl ProxyUrl {
    /// Create a validated [`ProxyUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if url::Url::parse(trimmed).is_err() {
            return Err(ValidationError::InvalidProxyUrl {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated proxy url.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_masks_interior_characters() {
        let key = ApiKey::new("ABCDEFGH").unwrap();
        assert_eq!(key.masked(), "AB********GH");
        assert_eq!(key.secret(), "ABCDEFGH");
    }

    #[test]
    fn api_key_shorter_than_four_masks_entirely() {
        let key = ApiKey::new("AB").unwrap();
        assert_eq!(key.masked(), "********");

        let key = ApiKey::new("ABC").unwrap();
        assert_eq!(key.masked(), "********");

        let key = ApiKey::new("ABCD").unwrap();
        assert_eq!(key.masked(), "AB********CD");
    }

    #[test]
    fn api_key_debug_and_display_never_leak_the_secret() {
        let key = ApiKey::new("SECRETKEY123").unwrap();
        assert!(!format!("{key:?}").contains("SECRETKEY123"));
        assert!(!key.to_string().contains("SECRETKEY123"));
        assert_eq!(key.to_string(), "SE********23");
    }

    #[test]
    fn api_key_trims_and_rejects_empty() {
        let key = ApiKey::new("  ABCDEFGH  ").unwrap();
        assert_eq!(key.secret(), "ABCDEFGH");
        assert!(ApiKey::new("   ").is_err());
    }

    #[test]
    fn masking_counts_characters_not_bytes() {
        let key = ApiKey::new("ключ-серый").unwrap();
        assert_eq!(key.masked(), "кл********ый");
    }

    #[test]
    fn string_newtypes_trim_or_validate() {
        let receptor = Receptor::new(" 09123456789 ").unwrap();
        assert_eq!(receptor.as_str(), "09123456789");
        assert!(Receptor::new("  ").is_err());

        let message = MessageText::new(" hi ").unwrap();
        assert_eq!(message.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());

        let sender = SenderLine::new(" 10004346 ").unwrap();
        assert_eq!(sender.as_str(), "10004346");
        assert!(SenderLine::new("").is_err());
    }

    #[test]
    fn proxy_url_requires_absolute_url() {
        let proxy = ProxyUrl::new("http://10.0.0.1:3128").unwrap();
        assert_eq!(proxy.as_str(), "http://10.0.0.1:3128");
        assert!(ProxyUrl::new("not a url").is_err());
    }
}
