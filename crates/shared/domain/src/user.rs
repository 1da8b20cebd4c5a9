use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one grantable capability.
///
/// Non-positive tags mean "no restriction": anything gated by them is public.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub i32);

impl Tag {
    /// The public tag.
    pub const PUBLIC: Self = Self(0);

    /// Whether this tag actually gates something.
    #[must_use]
    pub const fn is_restricted(self) -> bool {
        self.0 > 0
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A permission granted to a user. Only `tag` takes part in access decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "operacao", default)]
    pub operation: String,
    pub tag: Tag,
}

impl Permission {
    pub fn new(id: i64, operation: impl Into<String>, tag: impl Into<Tag>) -> Self {
        Self { id, operation: operation.into(), tag: tag.into() }
    }
}

/// The signed-in back-office user.
///
/// Field names on the wire follow the backend (`nome`, `icone`, `isSuporte`, `permissoes`).
/// `User::default()` is the empty sentinel: no identity, no permissions, no support role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "icone", default)]
    pub icon: Option<String>,
    #[serde(rename = "isSuporte", default)]
    pub is_support: bool,
    #[serde(rename = "permissoes", default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub token: String,
}

impl User {
    /// Iterates over the tags this user holds, in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.permissions.iter().map(|p| p.tag)
    }

    /// Linear membership test; use a tag set for repeated lookups.
    #[must_use]
    pub fn holds(&self, tag: Tag) -> bool {
        self.tags().any(|held| held == tag)
    }

    /// Whether this is the empty sentinel user.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.email.is_empty() && self.token.is_empty() && !self.is_support
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_backend_login_shape() {
        let raw = json!({
            "nome": "Ana Souza",
            "email": "ana@conciliador.com.br",
            "icone": null,
            "isSuporte": false,
            "permissoes": [{ "id": 7, "operacao": "Listar clientes", "tag": 1016 }],
            "token": "jwt"
        });

        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.name, "Ana Souza");
        assert!(!user.is_support);
        assert_eq!(user.permissions, vec![Permission::new(7, "Listar clientes", 1016)]);
        assert!(user.holds(Tag(1016)));
        assert!(!user.holds(Tag(1008)));
    }

    #[test]
    fn default_user_is_the_anonymous_sentinel() {
        let user = User::default();
        assert!(user.is_anonymous());
        assert!(!user.is_support);
        assert_eq!(user.tags().count(), 0);
    }

    #[test]
    fn tag_restriction() {
        assert!(!Tag::PUBLIC.is_restricted());
        assert!(!Tag(-3).is_restricted());
        assert!(Tag(1).is_restricted());
        assert_eq!(serde_json::to_string(&Tag(42)).unwrap(), "42");
    }
}
