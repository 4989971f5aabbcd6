use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Persisted `localStorage` keys.
pub mod keys {
    pub const THEME: &str = "theme";
    pub const PROFILE_IMAGE: &str = "profileImage";
    pub const PERSONAL_DATA: &str = "personalData";
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon shown on the toggle button while this theme is active.
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "fa-moon",
            Theme::Dark => "fa-sun",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme: {0}")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

/// Text regions the visitor can edit in place. The DOM marks each one with
/// `data-field="<name>"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Title,
    Occupation,
    About,
    Location,
    Email,
    Phone,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::Name,
        FieldName::Title,
        FieldName::Occupation,
        FieldName::About,
        FieldName::Location,
        FieldName::Email,
        FieldName::Phone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Title => "title",
            FieldName::Occupation => "occupation",
            FieldName::About => "about",
            FieldName::Location => "location",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
        }
    }

    pub fn default_text(self) -> &'static str {
        match self {
            FieldName::Name => "Nguyễn Văn An",
            FieldName::Title => "Lập trình viên Full-stack",
            FieldName::Occupation => "Kỹ sư phần mềm",
            FieldName::About => {
                "Tôi là một lập trình viên đam mê công nghệ, yêu thích xây dựng những sản phẩm \
                 web gọn gàng, nhanh và dễ sử dụng."
            }
            FieldName::Location => "Hà Nội, Việt Nam",
            FieldName::Email => "nguyenvanan@example.com",
            FieldName::Phone => "+84 912 345 678",
        }
    }

    /// Long-form fields are edited with a `<textarea>` instead of an `<input>`.
    pub fn is_long_form(self) -> bool {
        matches!(self, FieldName::About)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown editable field: {0}")]
pub struct ParseFieldError(pub String);

impl FromStr for FieldName {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseFieldError(s.to_owned()))
    }
}

// ── GitHub REST API types ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_parse_back() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>(), Ok(field));
        }
        assert!("nickname".parse::<FieldName>().is_err());
    }

    #[test]
    fn theme_serializes_lowercase() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Theme::Dark)?, "\"dark\"");
        assert_eq!(" light ".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        Ok(())
    }

    #[test]
    fn github_user_tolerates_missing_counts() -> Result<(), serde_json::Error> {
        let user: GitHubUser = serde_json::from_str(r#"{"login":"octocat"}"#)?;
        assert_eq!(user.public_repos, 0);
        assert_eq!(user.followers, 0);
        Ok(())
    }
}
