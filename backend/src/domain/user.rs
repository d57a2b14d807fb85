//! User identity model: short identifiers and case-folded usernames.

use std::fmt;
use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

/// Validation errors raised when constructing user primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    IdTooLong { max: usize },
    UsernameInvalidCharacters,
    UsernameLength { min: usize, max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "userId must not be empty"),
            Self::IdTooLong { max } => write!(f, "userId must be at most {max} characters"),
            Self::UsernameInvalidCharacters => write!(
                f,
                "Alphanumeric, hyphen, and underscore characters only (a-z, 0-9, -, _) with no spaces",
            ),
            Self::UsernameLength { min, max } => {
                write!(f, "Username length should be {min}-{max} characters long")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Alphabet used for generated identifiers; URL safe.
const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_-";
/// Length of generated identifiers.
pub const GENERATED_ID_LEN: usize = 9;
/// Upper bound accepted for identifiers supplied by callers.
pub const USER_ID_MAX: usize = 64;

/// Opaque short user identifier.
///
/// Identifiers minted by [`UserId::generate`] are nine characters drawn from
/// `[0-9A-Za-z_-]`. Identifiers read back from callers are only checked for
/// emptiness and length so lookups of unknown ids can still proceed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from caller input.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if trimmed.chars().count() > USER_ID_MAX {
            return Err(UserValidationError::IdTooLong { max: USER_ID_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Mint a new identifier from the supplied random source.
    ///
    /// # Examples
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    /// use exercise_tracker::domain::UserId;
    ///
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let id = UserId::generate(&mut rng);
    /// assert_eq!(id.as_ref().len(), 9);
    /// ```
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let id = (0..GENERATED_ID_LEN)
            .map(|_| {
                let index = rng.gen_range(0..ID_ALPHABET.len());
                char::from(ID_ALPHABET.get(index).copied().unwrap_or(b'0'))
            })
            .collect();
        Self(id)
    }

    /// Mint a new identifier from the thread-local random source.
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 10;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Lowercase username, unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate `raw` and fold it to lowercase.
    ///
    /// The character check runs first, then the length check; the first
    /// failure is returned.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if !username_regex().is_match(raw) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        let length = raw.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            return Err(UserValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Registered user.
///
/// ## Invariants
/// - `id` is assigned once at registration and never changes.
/// - `username` is stored in its lowercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Fallible constructor from raw strings, used when reading stored rows.
    pub fn try_from_strings(
        id: impl Into<String>,
        username: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, Username::new(username)?))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Lowercase username.
    pub fn username(&self) -> &Username {
        &self.username
    }
}
