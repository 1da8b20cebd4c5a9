use concil_kernel::domain::constants::MOBILE_USER_AGENTS;
use serde::{Deserialize, Serialize};

/// Which kind of device the menu is rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Classifies a user agent against the built-in mobile platform identifiers.
    ///
    /// ```rust
    /// use concil_access::DeviceClass;
    ///
    /// let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
    /// assert_eq!(DeviceClass::from_user_agent(Some(ua)), DeviceClass::Mobile);
    /// assert_eq!(DeviceClass::from_user_agent(None), DeviceClass::Desktop);
    /// ```
    #[must_use]
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        Self::from_user_agent_with(user_agent, MOBILE_USER_AGENTS)
    }

    /// Classifies a user agent against a custom identifier list.
    ///
    /// Matching is a case-insensitive substring search; an absent user agent is desktop.
    #[must_use]
    pub fn from_user_agent_with<S: AsRef<str>>(user_agent: Option<&str>, identifiers: &[S]) -> Self {
        let Some(user_agent) = user_agent else {
            return Self::Desktop;
        };

        let haystack = user_agent.to_ascii_lowercase();
        let mobile = identifiers
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|id| !id.is_empty())
            .any(|id| haystack.contains(&id.to_ascii_lowercase()));

        if mobile { Self::Mobile } else { Self::Desktop }
    }

    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}
