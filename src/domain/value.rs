use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Solapi API key, the public half of a credential pair.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Field name used in the `Authorization` header (`apiKey`).
    pub const FIELD: &'static str = "apiKey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Solapi API secret, the signing half of a credential pair.
///
/// Invariant: non-empty after trimming. The secret only ever feeds the HMAC
/// computation; it is never placed in a header, a body, or `Debug` output.
pub struct ApiSecret(String);

impl ApiSecret {
    /// Field name used in validation errors (`apiSecret`).
    pub const FIELD: &'static str = "apiSecret";

    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the secret for signing.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(***)")
    }
}

#[derive(Debug, Clone)]
/// API key/secret pair supplied at client construction.
///
/// Immutable for the lifetime of a client instance.
pub struct Credentials {
    api_key: ApiKey,
    api_secret: ApiSecret,
}

impl Credentials {
    /// Create validated credentials from raw key and secret strings.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            api_secret: ApiSecret::new(api_secret)?,
        })
    }

    /// The public API key.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// The signing secret.
    pub fn api_secret(&self) -> &ApiSecret {
        &self.api_secret
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-issued message group identifier.
///
/// An opaque handle: created by `create_group`, referenced by the other group
/// calls, destroyed server-side by `remove_group`. Invariant: non-empty after
/// trimming.
pub struct GroupId(String);

impl GroupId {
    /// Field name used by Solapi (`groupId`).
    pub const FIELD: &'static str = "groupId";

    /// Create a validated [`GroupId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated group id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-issued message identifier.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Field name used by Solapi (`messageId`).
    pub const FIELD: &'static str = "messageId";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number as sent to Solapi (`to` / `from`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you
/// want E.164 normalization, parse into [`PhoneNumber`] and convert it into
/// [`Recipient`]. Korean local forms (`01012345678`) are passed through
/// untouched, which is what the API expects.
pub struct Recipient(String);

impl Recipient {
    /// Field name used by Solapi (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) recipient.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Solapi.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Recipient {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Field name used by Solapi (`to`).
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit
    /// country prefix; pass `Some(country::Id::KR)` for Korean local numbers.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Application identifier attached to sends (`appId`).
///
/// Invariant: non-empty after trimming.
pub struct AppId(String);

impl AppId {
    /// Field name used by Solapi (`appId`).
    pub const FIELD: &'static str = "appId";

    /// Create a validated [`AppId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated app id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identifier of an image previously uploaded to storage (`imageId`).
///
/// Invariant: non-empty after trimming.
pub struct ImageId(String);

impl ImageId {
    /// Field name used by Solapi (`imageId`).
    pub const FIELD: &'static str = "imageId";

    /// Create a validated [`ImageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated image id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Message channel type (`type`).
pub enum MessageType {
    /// Short text message.
    Sms,
    /// Long text message.
    Lms,
    /// Multimedia message.
    Mms,
    /// Kakao alim-talk.
    Ata,
    /// Kakao chingu-talk.
    Cta,
    /// Kakao chingu-talk with image.
    Cti,
    /// Naver smart alert.
    Nsa,
    /// Rich communication services.
    Rcs,
}

impl MessageType {
    /// Wire tag as used by Solapi.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Lms => "LMS",
            Self::Mms => "MMS",
            Self::Ata => "ATA",
            Self::Cta => "CTA",
            Self::Cti => "CTI",
            Self::Nsa => "NSA",
            Self::Rcs => "RCS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Kind of file being uploaded to storage (`type`).
pub enum FileType {
    Kakao,
    Mms,
    Document,
    Rcs,
}

impl FileType {
    /// Wire tag as used by Solapi.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kakao => "KAKAO",
            Self::Mms => "MMS",
            Self::Document => "DOCUMENT",
            Self::Rcs => "RCS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ApiKey::new("  ").is_err());

        let secret = ApiSecret::new(" s3cret ").unwrap();
        assert_eq!(secret.as_str(), "s3cret");
        assert!(ApiSecret::new("").is_err());

        let group = GroupId::new(" G4V2001 ").unwrap();
        assert_eq!(group.as_str(), "G4V2001");
        assert!(GroupId::new("  ").is_err());

        let message = MessageId::new(" M4V2001 ").unwrap();
        assert_eq!(message.as_str(), "M4V2001");
        assert!(MessageId::new("  ").is_err());

        let app = AppId::new(" app ").unwrap();
        assert_eq!(app.as_str(), "app");
        assert!(AppId::new("  ").is_err());

        let image = ImageId::new(" img ").unwrap();
        assert_eq!(image.as_str(), "img");
        assert!(ImageId::new("  ").is_err());
    }

    #[test]
    fn api_secret_debug_is_redacted() {
        let secret = ApiSecret::new("topsecret").unwrap();
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("topsecret"));

        let credentials = Credentials::new("key", "topsecret").unwrap();
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("topsecret"));
    }

    #[test]
    fn recipient_trims_and_exposes_raw() {
        let recipient = Recipient::new(" 01012345678 ").unwrap();
        assert_eq!(recipient.raw(), "01012345678");
        assert!(Recipient::new("").is_err());
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(Some(country::Id::KR), "01012345678").unwrap();
        let p2 = PhoneNumber::parse(None, "+82 10-1234-5678").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+821012345678");

        let recipient: Recipient = p1.clone().into();
        assert_eq!(recipient.raw(), "+821012345678");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn wire_tags_are_uppercase_literals() {
        assert_eq!(MessageType::Sms.as_str(), "SMS");
        assert_eq!(MessageType::Rcs.as_str(), "RCS");
        assert_eq!(FileType::Kakao.as_str(), "KAKAO");
        assert_eq!(FileType::Document.as_str(), "DOCUMENT");
    }
}
